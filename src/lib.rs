//! # vless-rs
//!
//! Credential provisioning for VLESS/Reality VPN servers.
//!
//! This crate is an umbrella over the member crates:
//!
//! - [`vless_core`] - Shared constants and defaults
//! - [`vless_config`] - Configuration loading and validation
//! - [`vless_xray`] - Xray daemon bridge (client list + reloads)
//! - [`vless_store`] - File-backed credential store and admin CLI

pub use vless_config as config;
pub use vless_core as core;
pub use vless_store as store;
pub use vless_xray as xray;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use vless_config::{Config, load_config, validate_config};
    pub use vless_store::{JsonStore, StoreError, UserRecord, access_link};
    pub use vless_xray::{DaemonControl, NoopDaemon, SystemdDaemon, XrayBridge};
}
