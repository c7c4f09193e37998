//! Persisted user record and collection types.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One provisioned identity.
///
/// `uuid`, `email`, `vless_link`, and `created_at` are immutable once
/// issued; `active` and `traffic_used` are reserved for administrative
/// and accounting use and are not updated by this core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique key within the store (case-sensitive).
    pub username: String,
    /// Credential id embedded in the access link. Generated once, never
    /// reused, even after the record is deleted.
    pub uuid: Uuid,
    /// Contact label, derived as `<username>@vpn.local`.
    pub email: String,
    /// Optional chat-platform id, secondary lookup key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram_id: Option<i64>,
    /// Cached access link.
    pub vless_link: String,
    /// Creation time, unix seconds.
    pub created_at: i64,
    /// Administrative enable flag.
    #[serde(default = "default_active")]
    pub active: bool,
    /// Traffic counter in bytes, reserved for future accounting.
    #[serde(default)]
    pub traffic_used: i64,
}

/// The persisted collection, rewritten in full on every mutation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsersDb {
    #[serde(default)]
    pub users: Vec<UserRecord>,
}

fn default_active() -> bool {
    true
}

/// Current unix timestamp.
#[inline]
#[allow(clippy::cast_possible_wrap)]
pub(crate) fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
