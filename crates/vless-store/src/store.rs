//! JSON-file-backed credential store.
//!
//! [`JsonStore`] is the single source of truth for provisioned users.
//! Every mutation is a load-mutate-save cycle serialized through one
//! async mutex (single-writer discipline), with the save going through
//! a temp-file rename so a crash mid-write never truncates the
//! collection. Reads degrade: a missing or malformed collection file
//! yields the empty collection so the service stays available.

use std::fs;
use std::path::PathBuf;

use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use vless_core::defaults;
use vless_xray::{DaemonControl, XrayBridge};

use crate::error::StoreError;
use crate::link::access_link;
use crate::record::{UserRecord, UsersDb, now_unix};

/// File-backed credential store.
///
/// # Type parameter
///
/// - `D` — the daemon controller behind the bridge (e.g.
///   [`SystemdDaemon`](vless_xray::SystemdDaemon), or
///   [`NoopDaemon`](vless_xray::NoopDaemon) in tests)
pub struct JsonStore<D: DaemonControl> {
    db_path: PathBuf,
    bridge: XrayBridge<D>,
    write_lock: Mutex<()>,
}

impl<D: DaemonControl> JsonStore<D> {
    /// Open a store at the given path, seeding an empty collection file
    /// when none exists yet.
    pub fn open(db_path: impl Into<PathBuf>, bridge: XrayBridge<D>) -> Result<Self, StoreError> {
        let store = Self {
            db_path: db_path.into(),
            bridge,
            write_lock: Mutex::new(()),
        };
        if !store.db_path.exists() {
            store.save_db(&UsersDb::default())?;
        }
        Ok(store)
    }

    /// Get a reference to the underlying bridge.
    pub fn bridge(&self) -> &XrayBridge<D> {
        &self.bridge
    }

    /// Provision a new user.
    ///
    /// Fails with [`StoreError::UsernameTaken`] on a duplicate username
    /// and [`StoreError::TelegramIdTaken`] when the telegram id is
    /// already bound to another record. The xray registration is
    /// best-effort; the durable write is not. The daemon reload happens
    /// after the store lock is released and its failure is logged, not
    /// propagated.
    pub async fn create_user(
        &self,
        username: &str,
        telegram_id: Option<i64>,
    ) -> Result<UserRecord, StoreError> {
        // Server metadata does not depend on the collection; resolve it
        // before taking the lock so the probe never blocks other writers.
        let server_addr = self.bridge.resolve_server_address().await;
        let public_key = self.bridge.resolve_public_key();

        let record = {
            let _guard = self.write_lock.lock().await;
            let mut db = self.load_db();

            if db.users.iter().any(|u| u.username == username) {
                return Err(StoreError::UsernameTaken(username.to_string()));
            }
            if let Some(id) = telegram_id
                && db.users.iter().any(|u| u.telegram_id == Some(id))
            {
                return Err(StoreError::TelegramIdTaken(id));
            }

            let uuid = Uuid::new_v4();
            let email = format!("{username}@{}", defaults::EMAIL_DOMAIN);
            self.bridge.register_client(uuid, &email);

            let record = UserRecord {
                username: username.to_string(),
                uuid,
                email,
                telegram_id,
                vless_link: access_link(&uuid, &server_addr, &public_key, username),
                created_at: now_unix(),
                active: true,
                traffic_used: 0,
            };
            db.users.push(record.clone());
            self.save_db(&db)?;
            record
        };

        if !self.bridge.reload_daemon().await {
            warn!(username, "daemon reload failed after provisioning");
        }
        info!(username, uuid = %record.uuid, "user provisioned");
        Ok(record)
    }

    /// Remove a user. Returns `Ok(false)` when the username is unknown.
    ///
    /// The matching allow-list entry is deregistered and the daemon
    /// reloaded best-effort; only the durable write can fail the call.
    pub async fn remove_user(&self, username: &str) -> Result<bool, StoreError> {
        {
            let _guard = self.write_lock.lock().await;
            let mut db = self.load_db();

            let Some(pos) = db.users.iter().position(|u| u.username == username) else {
                return Ok(false);
            };
            let record = db.users.remove(pos);
            self.bridge.deregister_client(record.uuid);
            self.save_db(&db)?;
        }

        if !self.bridge.reload_daemon().await {
            warn!(username, "daemon reload failed after removal");
        }
        info!(username, "user removed");
        Ok(true)
    }

    /// Look up a user by username.
    pub fn get_user(&self, username: &str) -> Option<UserRecord> {
        self.load_db()
            .users
            .into_iter()
            .find(|u| u.username == username)
    }

    /// Look up a user by telegram id. At most one record can hold a
    /// given id; duplicates are rejected at creation.
    pub fn get_user_by_telegram_id(&self, telegram_id: i64) -> Option<UserRecord> {
        self.load_db()
            .users
            .into_iter()
            .find(|u| u.telegram_id == Some(telegram_id))
    }

    /// All users in insertion order. Pagination is the caller's concern.
    pub fn list_users(&self) -> Vec<UserRecord> {
        self.load_db().users
    }

    /// Cached access link for a username.
    pub fn user_link(&self, username: &str) -> Option<String> {
        self.get_user(username).map(|u| u.vless_link)
    }

    fn load_db(&self) -> UsersDb {
        let data = match fs::read_to_string(&self.db_path) {
            Ok(data) => data,
            Err(e) => {
                warn!(
                    path = %self.db_path.display(),
                    error = %e,
                    "user collection unreadable, starting empty"
                );
                return UsersDb::default();
            }
        };
        match serde_json::from_str(&data) {
            Ok(db) => db,
            Err(e) => {
                warn!(
                    path = %self.db_path.display(),
                    error = %e,
                    "user collection malformed, starting empty"
                );
                UsersDb::default()
            }
        }
    }

    fn save_db(&self, db: &UsersDb) -> Result<(), StoreError> {
        let data = serde_json::to_string_pretty(db)?;
        let tmp_path = self.db_path.with_extension("json.tmp");
        fs::write(&tmp_path, data)?;
        fs::rename(&tmp_path, &self.db_path)?;
        Ok(())
    }
}

impl<D: DaemonControl> std::fmt::Debug for JsonStore<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonStore")
            .field("db_path", &self.db_path)
            .finish_non_exhaustive()
    }
}
