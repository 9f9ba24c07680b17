// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use tempfile::tempdir;

#[test]
fn test_memory_storage_roundtrip() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.get("token"), None);
    storage.set("token", "t1").unwrap();
    assert_eq!(storage.get("token").as_deref(), Some("t1"));
    storage.remove("token").unwrap();
    assert_eq!(storage.get("token"), None);
}

#[test]
fn test_file_storage_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("session.json");

    let storage = FileStorage::open(&path).unwrap();
    storage.set("refreshToken", "r1").unwrap();
    storage.set("token", "t1").unwrap();
    drop(storage);

    let reopened = FileStorage::open(&path).unwrap();
    assert_eq!(reopened.get("refreshToken").as_deref(), Some("r1"));
    assert_eq!(reopened.get("token").as_deref(), Some("t1"));
}

#[test]
fn test_file_storage_remove() {
    let dir = tempdir().unwrap();
    let storage = FileStorage::open(&dir.path().join("session.json")).unwrap();
    storage.set("token", "t1").unwrap();
    storage.remove("token").unwrap();
    assert_eq!(storage.get("token"), None);
    // Removing a missing key is a no-op
    storage.remove("token").unwrap();
}

#[test]
fn test_file_storage_missing_file_is_empty() {
    let dir = tempdir().unwrap();
    let storage = FileStorage::open(&dir.path().join("absent.json")).unwrap();
    assert_eq!(storage.get("token"), None);
    assert!(!storage.path().exists());
}

#[test]
fn test_file_storage_corrupt_file_is_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "not json").unwrap();

    let storage = FileStorage::open(&path).unwrap();
    assert_eq!(storage.get("token"), None);
    storage.set("token", "t2").unwrap();
    assert_eq!(storage.get("token").as_deref(), Some("t2"));
}
