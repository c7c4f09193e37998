//! Daemon control trait and implementations.

use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use vless_core::defaults;

/// Process-control seam for the proxy daemon.
///
/// Implementations must be thread-safe (`Send + Sync`) and must never
/// fail loudly: a broken environment is reported as `false` or a
/// fallback address, not as an error.
#[async_trait]
pub trait DaemonControl: Send + Sync {
    /// Restart the daemon so it picks up the rewritten config.
    ///
    /// Returns `false` on non-zero exit, spawn failure, or timeout.
    async fn reload(&self) -> bool;

    /// Probe for the server's externally visible address.
    ///
    /// Returns the loopback address when the probe fails.
    async fn resolve_external_address(&self) -> String;
}

/// Blanket implementation for `Arc<D>` where `D: DaemonControl`.
#[async_trait]
impl<D: DaemonControl + ?Sized> DaemonControl for Arc<D> {
    #[inline]
    async fn reload(&self) -> bool {
        (**self).reload().await
    }

    #[inline]
    async fn resolve_external_address(&self) -> String {
        (**self).resolve_external_address().await
    }
}

/// Controls a systemd-managed xray unit.
#[derive(Debug, Clone)]
pub struct SystemdDaemon {
    service: String,
    reload_timeout: Duration,
    http: reqwest::Client,
}

impl SystemdDaemon {
    /// Create a controller for the given systemd unit.
    pub fn new(service: impl Into<String>, reload_timeout: Duration) -> Self {
        Self {
            service: service.into(),
            reload_timeout,
            http: reqwest::Client::new(),
        }
    }

    /// Unit name this controller restarts.
    pub fn service(&self) -> &str {
        &self.service
    }
}

impl Default for SystemdDaemon {
    fn default() -> Self {
        Self::new(
            defaults::DEFAULT_XRAY_SERVICE,
            Duration::from_secs(defaults::DEFAULT_RELOAD_TIMEOUT_SECS),
        )
    }
}

#[async_trait]
impl DaemonControl for SystemdDaemon {
    async fn reload(&self) -> bool {
        let status = tokio::process::Command::new("systemctl")
            .arg("restart")
            .arg(&self.service)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status();

        match tokio::time::timeout(self.reload_timeout, status).await {
            Ok(Ok(status)) if status.success() => {
                debug!(service = %self.service, "daemon restarted");
                true
            }
            Ok(Ok(status)) => {
                warn!(service = %self.service, %status, "daemon restart failed");
                false
            }
            Ok(Err(e)) => {
                warn!(service = %self.service, error = %e, "failed to spawn systemctl");
                false
            }
            Err(_) => {
                warn!(
                    service = %self.service,
                    timeout_secs = self.reload_timeout.as_secs(),
                    "daemon restart timed out"
                );
                false
            }
        }
    }

    async fn resolve_external_address(&self) -> String {
        let request = self
            .http
            .get(defaults::IP_PROBE_URL)
            .timeout(Duration::from_secs(defaults::IP_PROBE_TIMEOUT_SECS));

        match request.send().await {
            Ok(response) => match response.text().await {
                Ok(body) if !body.trim().is_empty() => body.trim().to_string(),
                _ => {
                    warn!("empty public-IP probe response, using loopback");
                    defaults::FALLBACK_SERVER_ADDR.to_string()
                }
            },
            Err(e) => {
                warn!(error = %e, "public-IP probe failed, using loopback");
                defaults::FALLBACK_SERVER_ADDR.to_string()
            }
        }
    }
}

/// Deterministic controller for tests and daemon-less local runs.
///
/// Never touches systemd or the network.
#[derive(Debug, Clone)]
pub struct NoopDaemon {
    address: String,
    reload_ok: bool,
}

impl NoopDaemon {
    /// Create a controller reporting the given address and reload outcome.
    pub fn new(address: impl Into<String>, reload_ok: bool) -> Self {
        Self {
            address: address.into(),
            reload_ok,
        }
    }
}

impl Default for NoopDaemon {
    fn default() -> Self {
        Self::new(defaults::FALLBACK_SERVER_ADDR, true)
    }
}

#[async_trait]
impl DaemonControl for NoopDaemon {
    async fn reload(&self) -> bool {
        debug!(ok = self.reload_ok, "noop daemon reload");
        self.reload_ok
    }

    async fn resolve_external_address(&self) -> String {
        self.address.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_daemon_reports_configured_outcome() {
        let ok = NoopDaemon::new("203.0.113.10", true);
        assert!(ok.reload().await);
        assert_eq!(ok.resolve_external_address().await, "203.0.113.10");

        let failing = NoopDaemon::new("203.0.113.10", false);
        assert!(!failing.reload().await);
    }

    #[tokio::test]
    async fn test_systemd_daemon_missing_unit_reports_false() {
        // systemctl is either absent or refuses the bogus unit; both
        // paths must reduce to `false` without erroring.
        let daemon = SystemdDaemon::new(
            "vless-test-unit-that-does-not-exist",
            Duration::from_secs(2),
        );
        assert!(!daemon.reload().await);
    }
}
