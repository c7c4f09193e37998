//! Configuration type definitions for the store, xray bridge, admin
//! allow-list, and logging.

use std::collections::{HashMap, HashSet};
use std::env;

use serde::{Deserialize, Serialize};
use vless_core::defaults;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub xray: XrayConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Credential store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the persisted user collection.
    #[serde(default = "default_users_db")]
    pub users_db: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            users_db: default_users_db(),
        }
    }
}

/// Xray daemon bridge settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XrayConfig {
    /// Path of the daemon configuration artifact.
    #[serde(default = "default_xray_config")]
    pub config: String,
    /// Path of the server info artifact (Reality public key).
    #[serde(default = "default_server_info")]
    pub server_info: String,
    /// Systemd unit restarted after every store mutation.
    #[serde(default = "default_xray_service")]
    pub service: String,
    /// Daemon restart timeout in seconds.
    #[serde(default = "default_reload_timeout_secs")]
    pub reload_timeout_secs: u64,
}

impl Default for XrayConfig {
    fn default() -> Self {
        Self {
            config: default_xray_config(),
            server_info: default_server_info(),
            service: default_xray_service(),
            reload_timeout_secs: default_reload_timeout_secs(),
        }
    }
}

/// Administrative allow-list and front-end credentials.
///
/// The chat front-end is an external collaborator; this section only
/// carries the identities it is allowed to act for and the service token
/// it authenticates with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Chat identities allowed to administer the roster.
    #[serde(default)]
    pub ids: Vec<i64>,
    /// Front-end service token. Falls back to the `BOT_TOKEN` environment
    /// variable when unset.
    #[serde(default)]
    pub token: Option<String>,
}

impl AdminConfig {
    /// Full allow-list: configured ids merged with the `ADMIN_IDS`
    /// environment variable (comma-separated).
    pub fn allow_list(&self) -> HashSet<i64> {
        let mut ids: HashSet<i64> = self.ids.iter().copied().collect();
        if let Ok(raw) = env::var(defaults::ENV_ADMIN_IDS) {
            ids.extend(parse_admin_ids(&raw));
        }
        ids
    }

    /// Membership test against the full allow-list.
    pub fn is_admin(&self, id: i64) -> bool {
        self.allow_list().contains(&id)
    }

    /// Service token, preferring the config value over the environment.
    pub fn token(&self) -> Option<String> {
        self.token
            .clone()
            .or_else(|| env::var(defaults::ENV_BOT_TOKEN).ok())
            .filter(|t| !t.trim().is_empty())
    }
}

/// Parse a comma-separated id list, skipping malformed entries.
pub fn parse_admin_ids(raw: &str) -> Vec<i64> {
    raw.split(',')
        .filter_map(|part| part.trim().parse::<i64>().ok())
        .collect()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Base log level (trace, debug, info, warn, error).
    pub level: Option<String>,
    /// Output format (json, pretty, compact).
    pub format: Option<String>,
    /// Output target (stdout, stderr).
    pub output: Option<String>,
    /// Per-module log level overrides.
    #[serde(default)]
    pub filters: HashMap<String, String>,
}

// ============================================================================
// Default Value Functions (for serde)
// ============================================================================

fn default_users_db() -> String {
    defaults::DEFAULT_USERS_DB_PATH.to_string()
}

fn default_xray_config() -> String {
    defaults::DEFAULT_XRAY_CONFIG_PATH.to_string()
}

fn default_server_info() -> String {
    defaults::DEFAULT_SERVER_INFO_PATH.to_string()
}

fn default_xray_service() -> String {
    defaults::DEFAULT_XRAY_SERVICE.to_string()
}

fn default_reload_timeout_secs() -> u64 {
    defaults::DEFAULT_RELOAD_TIMEOUT_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.store.users_db, defaults::DEFAULT_USERS_DB_PATH);
        assert_eq!(config.xray.service, "xray");
        assert_eq!(config.xray.reload_timeout_secs, 10);
        assert!(config.admin.ids.is_empty());
    }

    #[test]
    fn test_parse_admin_ids() {
        assert_eq!(parse_admin_ids("1, 2,3"), vec![1, 2, 3]);
        assert_eq!(parse_admin_ids("42"), vec![42]);
        assert_eq!(parse_admin_ids("not-a-number, 7"), vec![7]);
        assert!(parse_admin_ids("").is_empty());
    }

    #[test]
    fn test_allow_list_from_config() {
        let admin = AdminConfig {
            ids: vec![100, 200],
            token: None,
        };
        assert!(admin.is_admin(100));
        assert!(admin.is_admin(200));
        assert!(!admin.is_admin(300));
    }

    #[test]
    fn test_allow_list_merges_env_ids() {
        let admin = AdminConfig {
            ids: vec![100],
            token: None,
        };

        // ids deliberately unique to this test so parallel tests that
        // assert non-membership are unaffected
        unsafe { env::set_var(defaults::ENV_ADMIN_IDS, "910001, 910002") };
        let ids = admin.allow_list();
        unsafe { env::remove_var(defaults::ENV_ADMIN_IDS) };

        assert!(ids.contains(&100));
        assert!(ids.contains(&910001));
        assert!(ids.contains(&910002));
    }

    #[test]
    fn test_token_prefers_config_and_filters_blank() {
        let configured = AdminConfig {
            ids: vec![],
            token: Some("cfg-token".into()),
        };
        assert_eq!(configured.token().as_deref(), Some("cfg-token"));

        // a blank configured token is treated as no token at all
        let blank = AdminConfig {
            ids: vec![],
            token: Some("   ".into()),
        };
        assert_eq!(blank.token(), None);
    }

    #[test]
    fn test_token_falls_back_to_env() {
        let admin = AdminConfig {
            ids: vec![],
            token: None,
        };

        unsafe { env::set_var(defaults::ENV_BOT_TOKEN, "env-token") };
        let token = admin.token();
        unsafe { env::remove_var(defaults::ENV_BOT_TOKEN) };

        assert_eq!(token.as_deref(), Some("env-token"));
    }
}
