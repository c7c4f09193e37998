//! Store error types.

/// Credential store error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A record with this username already exists.
    #[error("username already exists: {0}")]
    UsernameTaken(String),

    /// Another record is already bound to this telegram id.
    #[error("telegram id already bound: {0}")]
    TelegramIdTaken(i64),

    /// Lookup miss.
    #[error("user not found: {0}")]
    NotFound(String),

    /// The durable write did not complete; the mutation must not be
    /// treated as successful.
    #[error("persistence: {0}")]
    Persistence(#[from] std::io::Error),

    /// The collection could not be encoded for writing.
    #[error("encode: {0}")]
    Encode(#[from] serde_json::Error),
}
