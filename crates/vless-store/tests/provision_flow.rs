//! Integration tests for the provisioning flow.
//!
//! These tests exercise the full path through real on-disk artifacts:
//! - store mutation + durable JSON collection
//! - xray client-list synchronization
//! - server metadata resolution with degraded fallbacks

use std::fs;

use vless_store::{JsonStore, UsersDb};
use vless_xray::{NoopDaemon, XrayBridge, XrayDocument};

const XRAY_CONFIG: &str = r#"{
    "log": {"loglevel": "warning"},
    "inbounds": [{
        "port": 443,
        "protocol": "vless",
        "settings": {"clients": [], "decryption": "none"}
    }]
}"#;

struct TestEnv {
    dir: tempfile::TempDir,
}

impl TestEnv {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.json"), XRAY_CONFIG).unwrap();
        fs::write(
            dir.path().join("server_info.txt"),
            "Public Key: pbk_integration\n",
        )
        .unwrap();
        Self { dir }
    }

    fn store(&self) -> JsonStore<NoopDaemon> {
        let bridge = XrayBridge::new(
            self.dir.path().join("config.json"),
            self.dir.path().join("server_info.txt"),
            NoopDaemon::new("198.51.100.7", true),
        );
        JsonStore::open(self.dir.path().join("users.json"), bridge).unwrap()
    }

    fn xray_document(&self) -> XrayDocument {
        let data = fs::read_to_string(self.dir.path().join("config.json")).unwrap();
        serde_json::from_str(&data).unwrap()
    }
}

#[tokio::test]
async fn provision_bob_end_to_end() {
    let env = TestEnv::new();
    let store = env.store();

    let bob = store.create_user("bob", Some(555)).await.unwrap();

    assert_eq!(bob.username, "bob");
    assert_eq!(bob.telegram_id, Some(555));
    assert_eq!(bob.email, "bob@vpn.local");
    assert!(bob.active);
    assert_eq!(bob.traffic_used, 0);
    assert!(bob.vless_link.starts_with("vless://"));
    assert!(bob.vless_link.ends_with("#bob"));
    assert!(bob.vless_link.contains("@198.51.100.7:443"));
    assert!(bob.vless_link.contains("pbk=pbk_integration"));

    // secondary lookup key returns the same record
    let by_id = store.get_user_by_telegram_id(555).unwrap();
    assert_eq!(by_id, bob);

    // the daemon allow-list mirrors the store
    let doc = env.xray_document();
    let clients = doc.client_list().unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].id, bob.uuid);
    assert_eq!(clients[0].email, "bob@vpn.local");
}

#[tokio::test]
async fn collection_roundtrips_through_storage() {
    let env = TestEnv::new();
    let store = env.store();

    for (i, name) in ["alice", "bob", "carol"].iter().enumerate() {
        store.create_user(name, Some(i as i64 + 1)).await.unwrap();
    }
    let before = store.list_users();

    // reopen from the same path with no intervening mutation
    let reopened = env.store();
    let mut after = reopened.list_users();

    assert_eq!(after.len(), before.len());
    after.sort_by(|a, b| a.username.cmp(&b.username));
    let mut sorted_before = before.clone();
    sorted_before.sort_by(|a, b| a.username.cmp(&b.username));
    assert_eq!(after, sorted_before);
}

#[tokio::test]
async fn remove_clears_both_artifacts() {
    let env = TestEnv::new();
    let store = env.store();

    let alice = store.create_user("alice", None).await.unwrap();
    store.create_user("bob", None).await.unwrap();

    assert!(store.remove_user("alice").await.unwrap());

    let names: Vec<String> = store
        .list_users()
        .into_iter()
        .map(|u| u.username)
        .collect();
    assert_eq!(names, ["bob"]);

    let doc = env.xray_document();
    let clients = doc.client_list().unwrap();
    assert_eq!(clients.len(), 1);
    assert!(clients.iter().all(|c| c.id != alice.uuid));
}

#[tokio::test]
async fn persisted_collection_is_the_documented_shape() {
    let env = TestEnv::new();
    let store = env.store();
    store.create_user("alice", None).await.unwrap();

    let raw = fs::read_to_string(env.dir.path().join("users.json")).unwrap();
    let db: UsersDb = serde_json::from_str(&raw).unwrap();
    assert_eq!(db.users.len(), 1);
    assert_eq!(db.users[0].username, "alice");

    // a single top-level "users" list, nothing else
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 1);
    assert!(object.contains_key("users"));
}
