//! CLI overrides applied on top of the loaded configuration.

use clap::Parser;

use crate::Config;

#[derive(Debug, Clone, Parser, Default)]
pub struct CliOverrides {
    /// Override the persisted user collection path
    #[arg(long)]
    pub users_db: Option<String>,
    /// Override the xray config artifact path
    #[arg(long)]
    pub xray_config: Option<String>,
    /// Override the server info artifact path
    #[arg(long)]
    pub server_info: Option<String>,
    /// Override the systemd unit name
    #[arg(long)]
    pub service: Option<String>,
    /// Override the daemon reload timeout (seconds)
    #[arg(long)]
    pub reload_timeout_secs: Option<u64>,
    /// Override the admin allow-list (repeatable or comma-separated)
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    pub admin_id: Option<Vec<i64>>,
    /// Override log level (trace/debug/info/warn/error)
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn apply_overrides(config: &mut Config, overrides: &CliOverrides) {
    if let Some(v) = &overrides.users_db {
        config.store.users_db = v.clone();
    }
    if let Some(v) = &overrides.xray_config {
        config.xray.config = v.clone();
    }
    if let Some(v) = &overrides.server_info {
        config.xray.server_info = v.clone();
    }
    if let Some(v) = &overrides.service {
        config.xray.service = v.clone();
    }
    if let Some(v) = overrides.reload_timeout_secs {
        config.xray.reload_timeout_secs = v;
    }
    if let Some(v) = &overrides.admin_id {
        config.admin.ids = v.clone();
    }
    if let Some(v) = &overrides.log_level {
        config.logging.level = Some(v.clone());
    }
}
