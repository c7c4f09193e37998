//! The bridge between the credential store and the xray daemon.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

use vless_core::defaults;

use crate::daemon::DaemonControl;
use crate::schema::{XrayClient, XrayDocument};

/// Mirrors store mutations into the daemon's client allow-list and
/// resolves the server metadata embedded in access links.
///
/// All filesystem and process interaction is best-effort. A host without
/// the config artifact (a test machine, a half-provisioned box) gets
/// warnings and no-ops, never errors.
pub struct XrayBridge<D: DaemonControl> {
    config_path: PathBuf,
    server_info_path: PathBuf,
    daemon: D,
}

impl<D: DaemonControl> XrayBridge<D> {
    pub fn new(
        config_path: impl Into<PathBuf>,
        server_info_path: impl Into<PathBuf>,
        daemon: D,
    ) -> Self {
        Self {
            config_path: config_path.into(),
            server_info_path: server_info_path.into(),
            daemon,
        }
    }

    /// Path of the daemon config artifact.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Append a client entry to the daemon's allow-list.
    ///
    /// No-op when the artifact is missing, malformed, or has no inbound.
    pub fn register_client(&self, id: Uuid, email: &str) {
        let Some(mut doc) = self.load_document() else {
            return;
        };
        let Some(clients) = doc.client_list_mut() else {
            warn!(path = %self.config_path.display(), "xray config has no inbound, skipping register");
            return;
        };
        clients.push(XrayClient::new(id, email));
        self.store_document(&doc);
    }

    /// Remove any allow-list entry matching the credential id.
    pub fn deregister_client(&self, id: Uuid) {
        let Some(mut doc) = self.load_document() else {
            return;
        };
        let Some(clients) = doc.client_list_mut() else {
            return;
        };
        let before = clients.len();
        clients.retain(|c| c.id != id);
        if clients.len() != before {
            self.store_document(&doc);
        }
    }

    /// Ask the daemon to pick up the rewritten config.
    pub async fn reload_daemon(&self) -> bool {
        self.daemon.reload().await
    }

    /// Server address for access links: `SERVER_IP` override first,
    /// then the controller's probe (which falls back to loopback).
    pub async fn resolve_server_address(&self) -> String {
        if let Ok(ip) = env::var(defaults::ENV_SERVER_IP)
            && !ip.trim().is_empty()
        {
            return ip.trim().to_string();
        }
        self.daemon.resolve_external_address().await
    }

    /// Reality public key: `PUBLIC_KEY` override first, then the
    /// `Public Key: <token>` line of the server info artifact, then a
    /// placeholder for daemon-less runs.
    pub fn resolve_public_key(&self) -> String {
        if let Ok(key) = env::var(defaults::ENV_PUBLIC_KEY)
            && !key.trim().is_empty()
        {
            return key.trim().to_string();
        }

        match fs::read_to_string(&self.server_info_path) {
            Ok(content) => content
                .lines()
                .find_map(|line| line.split_once("Public Key:"))
                .and_then(|(_, rest)| rest.split_whitespace().next())
                .map(str::to_string)
                .unwrap_or_else(|| {
                    warn!(
                        path = %self.server_info_path.display(),
                        "no public key line in server info, using placeholder"
                    );
                    defaults::FALLBACK_PUBLIC_KEY.to_string()
                }),
            Err(_) => {
                warn!(
                    path = %self.server_info_path.display(),
                    "server info unavailable, using placeholder public key"
                );
                defaults::FALLBACK_PUBLIC_KEY.to_string()
            }
        }
    }

    fn load_document(&self) -> Option<XrayDocument> {
        let data = match fs::read_to_string(&self.config_path) {
            Ok(data) => data,
            Err(e) => {
                debug!(
                    path = %self.config_path.display(),
                    error = %e,
                    "xray config unavailable, degraded mode"
                );
                return None;
            }
        };
        match serde_json::from_str(&data) {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!(
                    path = %self.config_path.display(),
                    error = %e,
                    "malformed xray config, skipping rewrite"
                );
                None
            }
        }
    }

    fn store_document(&self, doc: &XrayDocument) {
        let data = match serde_json::to_string_pretty(doc) {
            Ok(data) => data,
            Err(e) => {
                warn!(error = %e, "failed to encode xray config");
                return;
            }
        };
        if let Err(e) = fs::write(&self.config_path, data) {
            warn!(
                path = %self.config_path.display(),
                error = %e,
                "failed to write xray config, daemon list out of sync"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daemon::NoopDaemon;

    const MINIMAL_CONFIG: &str = r#"{"inbounds": [{"settings": {"clients": []}}]}"#;

    fn test_bridge(dir: &tempfile::TempDir) -> XrayBridge<NoopDaemon> {
        XrayBridge::new(
            dir.path().join("config.json"),
            dir.path().join("server_info.txt"),
            NoopDaemon::default(),
        )
    }

    fn read_clients(bridge: &XrayBridge<NoopDaemon>) -> Vec<XrayClient> {
        let data = fs::read_to_string(bridge.config_path()).unwrap();
        let doc: XrayDocument = serde_json::from_str(&data).unwrap();
        doc.client_list().unwrap().clone()
    }

    #[test]
    fn test_register_then_deregister() {
        let dir = tempfile::tempdir().unwrap();
        let bridge = test_bridge(&dir);
        fs::write(bridge.config_path(), MINIMAL_CONFIG).unwrap();

        let id = Uuid::new_v4();
        bridge.register_client(id, "alice@vpn.local");

        let clients = read_clients(&bridge);
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].id, id);
        assert_eq!(clients[0].email, "alice@vpn.local");
        assert_eq!(clients[0].flow, "xtls-rprx-vision");

        bridge.deregister_client(id);
        assert!(read_clients(&bridge).is_empty());
    }

    #[test]
    fn test_missing_config_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let bridge = test_bridge(&dir);

        bridge.register_client(Uuid::new_v4(), "ghost@vpn.local");
        bridge.deregister_client(Uuid::new_v4());
        assert!(!bridge.config_path().exists());
    }

    #[test]
    fn test_malformed_config_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let bridge = test_bridge(&dir);
        fs::write(bridge.config_path(), "{not json").unwrap();

        bridge.register_client(Uuid::new_v4(), "x@vpn.local");
        assert_eq!(
            fs::read_to_string(bridge.config_path()).unwrap(),
            "{not json"
        );
    }

    #[test]
    fn test_public_key_from_server_info() {
        let dir = tempfile::tempdir().unwrap();
        let bridge = test_bridge(&dir);
        fs::write(
            dir.path().join("server_info.txt"),
            "Address: 1.2.3.4\nPublic Key: pbk_abc123\nShort ID: 0123\n",
        )
        .unwrap();

        assert_eq!(bridge.resolve_public_key(), "pbk_abc123");
    }

    #[test]
    fn test_public_key_placeholder_when_info_missing() {
        let dir = tempfile::tempdir().unwrap();
        let bridge = test_bridge(&dir);

        assert_eq!(
            bridge.resolve_public_key(),
            defaults::FALLBACK_PUBLIC_KEY
        );
    }

    #[test]
    fn test_public_key_placeholder_when_line_missing() {
        let dir = tempfile::tempdir().unwrap();
        let bridge = test_bridge(&dir);
        fs::write(dir.path().join("server_info.txt"), "Address: 1.2.3.4\n").unwrap();

        assert_eq!(
            bridge.resolve_public_key(),
            defaults::FALLBACK_PUBLIC_KEY
        );
    }
}
