//! Xray daemon bridge for vless-rs.
//!
//! Keeps the daemon's client allow-list synchronized with the credential
//! store and triggers daemon reloads. Every operation is best-effort: a
//! missing config artifact, a failed restart, or an unreachable IP probe
//! degrades to a no-op or a fallback value so provisioning keeps working
//! on partially configured hosts (including daemon-less test machines).
//!
//! # Example
//!
//! ```no_run
//! use vless_xray::{NoopDaemon, XrayBridge};
//!
//! # async fn example() {
//! let bridge = XrayBridge::new(
//!     "/usr/local/etc/xray/config.json",
//!     "/root/server_info.txt",
//!     NoopDaemon::default(),
//! );
//! let addr = bridge.resolve_server_address().await;
//! let key = bridge.resolve_public_key();
//! # }
//! ```

mod bridge;
mod daemon;
mod schema;

pub use bridge::XrayBridge;
pub use daemon::{DaemonControl, NoopDaemon, SystemdDaemon};
pub use schema::{Inbound, InboundSettings, XrayClient, XrayDocument};
