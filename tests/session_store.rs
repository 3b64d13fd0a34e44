use std::fs;

use contact_manager::api::models::Profile;
use contact_manager::session::{Session, SessionStore};
use tempfile::TempDir;

fn sample_session() -> Session {
    Session {
        token: "eyJhbGciOiJIUzI1NiJ9.test".to_string(),
        user: Profile { id: 42, name: "Ann Lee".to_string(), email: "ann@example.com".to_string() },
    }
}

#[test]
fn empty_store_has_no_session() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::at(dir.path().join("session.toml"));
    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn saved_session_is_loaded_back() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::at(dir.path().join("state").join("session.toml"));
    store.save(&sample_session()).unwrap();
    assert_eq!(store.load().unwrap(), Some(sample_session()));
}

#[test]
fn clear_logs_out_and_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::at(dir.path().join("session.toml"));
    store.save(&sample_session()).unwrap();
    store.clear().unwrap();
    assert_eq!(store.load().unwrap(), None);
    store.clear().unwrap();
}

#[test]
fn blank_token_counts_as_logged_out() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.toml");
    fs::write(&path, "token = \"\"\n\n[user]\nid = 1\nname = \"x\"\nemail = \"x@example.com\"\n").unwrap();
    assert_eq!(SessionStore::at(path).load().unwrap(), None);
}

#[test]
fn corrupt_file_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.toml");
    fs::write(&path, "token = [").unwrap();
    let err = SessionStore::at(path).load().unwrap_err();
    assert!(matches!(err, contact_manager::Error::Config(_)));
}
