use std::fs;
use std::path::PathBuf;

use credential_store::{keys, CredentialStore, CredentialStoreError, FileCredentialStore, MemoryCredentialStore};
use serde_json::json;
use tempfile::TempDir;

fn store_path() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("credentials.json");
    (dir, path)
}

#[test]
fn missing_file_opens_as_empty_store() {
    let (_dir, path) = store_path();

    let store = FileCredentialStore::open(&path).expect("missing file opens empty");
    assert_eq!(store.get(keys::ACCESS_TOKEN).expect("get succeeds"), None);
}

#[test]
fn set_then_get_roundtrips_each_key_independently() {
    let (_dir, path) = store_path();
    let store = FileCredentialStore::open(&path).expect("store opens");

    store.set(keys::ACCESS_TOKEN, "tok-a").expect("set access token");
    store.set(keys::USERNAME, "alice").expect("set username");

    assert_eq!(
        store.get(keys::ACCESS_TOKEN).expect("get access token"),
        Some("tok-a".to_string())
    );
    assert_eq!(
        store.get(keys::USERNAME).expect("get username"),
        Some("alice".to_string())
    );
    assert_eq!(store.get(keys::REFRESH_TOKEN).expect("get refresh token"), None);
}

#[test]
fn entries_survive_reopen() {
    let (_dir, path) = store_path();

    {
        let store = FileCredentialStore::open(&path).expect("store opens");
        store.set(keys::ACCESS_TOKEN, "tok-a").expect("set access token");
        store.set(keys::REFRESH_TOKEN, "tok-r").expect("set refresh token");
        store.set(keys::USERNAME, "alice").expect("set username");
    }

    let reopened = FileCredentialStore::open(&path).expect("store reopens");
    assert_eq!(
        reopened.get(keys::ACCESS_TOKEN).expect("get access token"),
        Some("tok-a".to_string())
    );
    assert_eq!(
        reopened.get(keys::REFRESH_TOKEN).expect("get refresh token"),
        Some("tok-r".to_string())
    );
    assert_eq!(
        reopened.get(keys::USERNAME).expect("get username"),
        Some("alice".to_string())
    );
}

#[test]
fn remove_deletes_only_the_named_key_and_persists() {
    let (_dir, path) = store_path();

    {
        let store = FileCredentialStore::open(&path).expect("store opens");
        store.set(keys::ACCESS_TOKEN, "tok-a").expect("set access token");
        store.set(keys::USERNAME, "alice").expect("set username");
        store.remove(keys::ACCESS_TOKEN).expect("remove access token");
    }

    let reopened = FileCredentialStore::open(&path).expect("store reopens");
    assert_eq!(reopened.get(keys::ACCESS_TOKEN).expect("get access token"), None);
    assert_eq!(
        reopened.get(keys::USERNAME).expect("get username"),
        Some("alice".to_string())
    );
}

#[test]
fn remove_of_absent_key_is_a_noop() {
    let (_dir, path) = store_path();
    let store = FileCredentialStore::open(&path).expect("store opens");

    store.remove(keys::REFRESH_TOKEN).expect("absent remove succeeds");
    assert!(!path.exists(), "noop remove must not create the file");
}

#[test]
fn set_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("nested").join("deeper").join("credentials.json");

    let store = FileCredentialStore::open(&path).expect("store opens");
    store.set(keys::ACCESS_TOKEN, "tok-a").expect("set creates parents");

    assert!(path.exists());
}

#[test]
fn open_rejects_malformed_json() {
    let (_dir, path) = store_path();
    fs::write(&path, "not json at all").expect("write garbage");

    let error = FileCredentialStore::open(&path)
        .err()
        .expect("malformed file must fail");
    assert!(matches!(error, CredentialStoreError::Parse { .. }));
}

#[test]
fn open_rejects_non_object_payloads() {
    let (_dir, path) = store_path();
    fs::write(&path, json!(["access_token"]).to_string()).expect("write array");

    let error = FileCredentialStore::open(&path)
        .err()
        .expect("array payload must fail");
    assert!(matches!(error, CredentialStoreError::InvalidShape { .. }));
}

#[test]
fn open_rejects_non_string_values() {
    let (_dir, path) = store_path();
    fs::write(&path, json!({ "access_token": 42 }).to_string()).expect("write object");

    let error = FileCredentialStore::open(&path)
        .err()
        .expect("numeric value must fail");
    assert!(matches!(error, CredentialStoreError::InvalidShape { .. }));
}

#[cfg(unix)]
#[test]
fn credential_file_is_owner_readable_only() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, path) = store_path();
    let store = FileCredentialStore::open(&path).expect("store opens");
    store.set(keys::ACCESS_TOKEN, "tok-a").expect("set access token");

    let mode = fs::metadata(&path).expect("metadata").permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn memory_store_get_set_remove() {
    let store = MemoryCredentialStore::new();

    assert_eq!(store.get(keys::USERNAME).expect("get"), None);
    store.set(keys::USERNAME, "alice").expect("set");
    assert_eq!(store.get(keys::USERNAME).expect("get"), Some("alice".to_string()));
    store.remove(keys::USERNAME).expect("remove");
    assert_eq!(store.get(keys::USERNAME).expect("get"), None);
}
