//! File-backed credential store for vless-rs.
//!
//! This crate owns the durable record of provisioned users and their
//! generated access credentials, and drives the xray bridge on every
//! mutation.
//!
//! # Example
//!
//! ```no_run
//! use vless_store::JsonStore;
//! use vless_xray::{NoopDaemon, XrayBridge};
//!
//! # async fn example() -> Result<(), vless_store::StoreError> {
//! let bridge = XrayBridge::new(
//!     "/usr/local/etc/xray/config.json",
//!     "/root/server_info.txt",
//!     NoopDaemon::default(),
//! );
//! let store = JsonStore::open("/root/users.json", bridge)?;
//!
//! let user = store.create_user("alice", None).await?;
//! println!("{}", user.vless_link);
//! # Ok(())
//! # }
//! ```

pub mod cli;
mod error;
mod link;
mod record;
mod store;

pub use error::StoreError;
pub use link::access_link;
pub use record::{UserRecord, UsersDb};
pub use store::JsonStore;
