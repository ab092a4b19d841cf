mod common;

use cashcrew_sdk::config;
use cashcrew_sdk::models::Token;
use cashcrew_sdk::transport::Method;
use cashcrew_sdk::SessionStore;
use common::{group_json, sdk_in, token_json, MockTransport};
use serde_json::json;

fn token(access: &str, refresh: Option<&str>) -> Token {
    Token {
        access_token: access.to_string(),
        token_type: "bearer".to_string(),
        refresh_token: refresh.map(str::to_string),
    }
}

// ---------------------------------------------------------------------------
// SessionStore
// ---------------------------------------------------------------------------

#[test]
fn token_survives_a_new_store_on_the_same_dir() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(Some(dir.path().to_path_buf())).unwrap();
    store.save_token(&token("abc", Some("r1"))).unwrap();

    let reopened = SessionStore::new(Some(dir.path().to_path_buf())).unwrap();
    assert_eq!(reopened.load_token().unwrap(), Some(token("abc", Some("r1"))));
    assert!(!dir.path().join("access_token.tmp").exists());
}

#[test]
fn missing_token_type_defaults_to_bearer() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(config::KEY_ACCESS_TOKEN), "abc\n").unwrap();

    let store = SessionStore::new(Some(dir.path().to_path_buf())).unwrap();
    let restored = store.load_token().unwrap().unwrap();
    assert_eq!(restored.access_token, "abc");
    assert_eq!(restored.token_type, "bearer");
    assert_eq!(restored.refresh_token, None);
}

#[test]
fn clear_removes_every_key() {
    let store = SessionStore::in_memory();
    store.save_token(&token("abc", None)).unwrap();
    store.set(config::KEY_GROUPS, "[]").unwrap();

    store.clear().unwrap();
    assert_eq!(store.load_token().unwrap(), None);
    assert_eq!(store.get(config::KEY_GROUPS).unwrap(), None);
}

#[test]
fn corrupt_group_snapshot_is_removed() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(Some(dir.path().to_path_buf())).unwrap();
    store.set(config::KEY_GROUPS, "{not json").unwrap();

    let err = store.load_groups().unwrap_err();
    assert!(err.is_not_found());
    assert!(!dir.path().join(config::KEY_GROUPS).exists());
    assert_eq!(store.load_groups().unwrap(), None);
}

// ---------------------------------------------------------------------------
// Persistence through the client
// ---------------------------------------------------------------------------

#[test]
fn login_is_restored_on_next_build() {
    let dir = tempfile::tempdir().unwrap();
    let mock = MockTransport::new();
    mock.on(Method::Post, "/auth/login", 200, token_json("tok-1"));

    let first = sdk_in(dir.path(), &mock);
    assert!(!first.is_authenticated());
    first.auth().login("anna@example.com", "secret123").unwrap();
    drop(first);

    let second = sdk_in(dir.path(), &mock);
    assert!(second.is_authenticated());
    assert_eq!(second.session().token().unwrap().access_token, "tok-1");
}

#[test]
fn group_list_is_snapshotted_and_logout_forgets_it() {
    let dir = tempfile::tempdir().unwrap();
    let mock = MockTransport::new();
    mock.on(Method::Post, "/auth/login", 200, token_json("tok-1"));
    mock.on(
        Method::Get,
        "/groups",
        200,
        json!([group_json("g1", "Trip", vec![]), group_json("g2", "Flat", vec![])]),
    );

    let client = sdk_in(dir.path(), &mock);
    client.auth().login("anna@example.com", "secret123").unwrap();
    client.groups().list().unwrap();

    let restarted = sdk_in(dir.path(), &mock);
    let snapshot = restarted.groups().snapshot().unwrap().unwrap();
    let ids: Vec<&str> = snapshot.iter().map(|g| g.id.as_str()).collect();
    assert_eq!(ids, vec!["g1", "g2"]);

    restarted.auth().logout().unwrap();
    assert!(!restarted.is_authenticated());
    assert_eq!(restarted.groups().snapshot().unwrap(), None);
    assert!(!dir.path().join(config::KEY_ACCESS_TOKEN).exists());
}
