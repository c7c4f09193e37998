//! Configuration validation logic.

use crate::Config;
use crate::loader::ConfigError;

pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.store.users_db.trim().is_empty() {
        return Err(ConfigError::Validation("store.users_db is empty".into()));
    }
    if config.xray.config.trim().is_empty() {
        return Err(ConfigError::Validation("xray.config is empty".into()));
    }
    if config.xray.server_info.trim().is_empty() {
        return Err(ConfigError::Validation("xray.server_info is empty".into()));
    }
    if config.xray.service.trim().is_empty() {
        return Err(ConfigError::Validation("xray.service is empty".into()));
    }
    if config.xray.reload_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "xray.reload_timeout_secs must be > 0".into(),
        ));
    }
    if let Some(level) = config.logging.level.as_deref() {
        let valid = ["trace", "debug", "info", "warn", "error"];
        if !valid.contains(&level) {
            return Err(ConfigError::Validation(format!(
                "logging.level must be one of: {:?}",
                valid
            )));
        }
    }
    Ok(())
}
