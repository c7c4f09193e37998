//! Default configuration values.
//!
//! Centralized default constants for use across all crates.

// ============================================================================
// Link Literals
// ============================================================================

/// VLESS link scheme.
pub const VLESS_SCHEME: &str = "vless";
/// Server port embedded in every generated link.
pub const VLESS_PORT: u16 = 443;
/// XTLS flow identifier used for every client entry and link.
pub const VLESS_FLOW: &str = "xtls-rprx-vision";
/// Reality SNI mask domain.
pub const REALITY_SNI: &str = "yandex.ru";
/// TLS fingerprint advertised by clients.
pub const REALITY_FINGERPRINT: &str = "chrome";
/// Static Reality short id.
pub const REALITY_SHORT_ID: &str = "0123456789abcdef";

// ============================================================================
// Identity Defaults
// ============================================================================

/// Domain appended to usernames to form the per-client contact email.
pub const EMAIL_DOMAIN: &str = "vpn.local";

// ============================================================================
// Artifact Paths
// ============================================================================

/// Default xray daemon configuration path.
pub const DEFAULT_XRAY_CONFIG_PATH: &str = "/usr/local/etc/xray/config.json";
/// Default persisted user collection path.
pub const DEFAULT_USERS_DB_PATH: &str = "/root/users.json";
/// Default server info text artifact (holds the Reality public key).
pub const DEFAULT_SERVER_INFO_PATH: &str = "/root/server_info.txt";
/// Default systemd unit controlling the proxy daemon.
pub const DEFAULT_XRAY_SERVICE: &str = "xray";

// ============================================================================
// Fallback Values
// ============================================================================

/// Server address used when neither the environment nor the probe yields one.
pub const FALLBACK_SERVER_ADDR: &str = "127.0.0.1";
/// Placeholder public key for daemon-less local runs.
pub const FALLBACK_PUBLIC_KEY: &str = "test_public_key_for_local_testing";

// ============================================================================
// Timeout Defaults
// ============================================================================

/// Default daemon reload (systemctl restart) timeout in seconds.
pub const DEFAULT_RELOAD_TIMEOUT_SECS: u64 = 10;
/// Public-IP probe timeout in seconds.
pub const IP_PROBE_TIMEOUT_SECS: u64 = 5;
/// Public-IP probe endpoint.
pub const IP_PROBE_URL: &str = "https://ifconfig.me";

// ============================================================================
// Environment Variables
// ============================================================================

/// Server address override.
pub const ENV_SERVER_IP: &str = "SERVER_IP";
/// Reality public key override.
pub const ENV_PUBLIC_KEY: &str = "PUBLIC_KEY";
/// Comma-separated administrative chat identities.
pub const ENV_ADMIN_IDS: &str = "ADMIN_IDS";
/// Chat front-end service token.
pub const ENV_BOT_TOKEN: &str = "BOT_TOKEN";
