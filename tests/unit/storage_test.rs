//! Tests for key-value storage backends

use std::fs;

use taskboard::storage::{FileStorage, MemoryStorage, Storage, TOKEN_KEY, USER_KEY};
use tempfile::TempDir;

#[test]
fn test_file_storage_survives_reopen() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("session.json");

    let storage = FileStorage::new(&path);
    storage.set(TOKEN_KEY, "t1").unwrap();
    storage.set(USER_KEY, r#"{"id":"u1"}"#).unwrap();

    let reopened = FileStorage::new(&path);
    assert_eq!(reopened.get(TOKEN_KEY).as_deref(), Some("t1"));
    assert_eq!(reopened.get(USER_KEY).as_deref(), Some(r#"{"id":"u1"}"#));
}

#[test]
fn test_file_storage_remove_all() {
    let temp = TempDir::new().unwrap();
    let storage = FileStorage::new(temp.path().join("session.json"));
    storage.set(TOKEN_KEY, "t1").unwrap();
    storage.set(USER_KEY, "{}").unwrap();
    storage.set("theme", "dark").unwrap();

    storage.remove_all(&[TOKEN_KEY, USER_KEY]).unwrap();

    assert!(storage.get(TOKEN_KEY).is_none());
    assert!(storage.get(USER_KEY).is_none());
    assert_eq!(storage.get("theme").as_deref(), Some("dark"));
}

#[test]
fn test_file_storage_missing_file_reads_empty() {
    let temp = TempDir::new().unwrap();
    let storage = FileStorage::new(temp.path().join("absent.json"));
    assert!(storage.get(TOKEN_KEY).is_none());
    storage.remove(TOKEN_KEY).unwrap();
    assert!(!storage.path().exists());
}

#[test]
fn test_file_storage_recovers_from_corrupt_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("session.json");
    fs::write(&path, "not json").unwrap();

    let storage = FileStorage::new(&path);
    assert!(storage.get(TOKEN_KEY).is_none());

    storage.set(TOKEN_KEY, "t2").unwrap();
    assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("t2"));
}

#[test]
fn test_memory_storage_basics() {
    let storage = MemoryStorage::with_entries([(TOKEN_KEY, "t1")]);
    assert_eq!(storage.len(), 1);

    storage.set(USER_KEY, "{}").unwrap();
    assert_eq!(storage.len(), 2);

    storage.remove_all(&[TOKEN_KEY, USER_KEY]).unwrap();
    assert!(storage.is_empty());
}
