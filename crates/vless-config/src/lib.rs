//! Configuration loading and CLI definitions for vless-rs.
//!
//! Configuration is layered: file (JSON/YAML/TOML, selected by extension),
//! then CLI overrides, then validation. Every section has working defaults
//! so the tooling runs without a config file at all.

mod cli;
mod loader;
mod types;
mod validate;

pub use cli::{CliOverrides, apply_overrides};
pub use loader::{ConfigError, load_config};
pub use types::{AdminConfig, Config, LoggingConfig, StoreConfig, XrayConfig};
pub use validate::validate_config;
