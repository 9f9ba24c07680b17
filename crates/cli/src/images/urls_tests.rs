// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::sync::Arc;

use yare::parameterized;

use super::*;

fn blob(bytes: &[u8]) -> ImageBlob {
    ImageBlob {
        bytes: Arc::new(bytes.to_vec()),
        mime: "image/png",
    }
}

#[test]
fn test_insert_creates_live_handle() {
    let mut table = ObjectUrlTable::new();
    let url = table.insert("AbC123", blob(b"png"));

    assert!(table.is_live(&url));
    assert_eq!(table.url("AbC123"), Some(&url));
    assert_eq!(*table.get("AbC123").unwrap().blob.bytes, b"png".to_vec());
    assert!(url.as_str().starts_with("blob:"));
}

#[test]
fn test_overwrite_revokes_previous_handle() {
    let mut table = ObjectUrlTable::new();
    let first = table.insert("AbC123", blob(b"v1"));
    let second = table.insert("AbC123", blob(b"v2"));

    assert_ne!(first, second);
    assert!(!table.is_live(&first));
    assert!(table.is_live(&second));
    assert_eq!(table.live_handles(), 1);
    assert_eq!(table.len(), 1);
}

#[test]
fn test_remove_revokes_handle() {
    let mut table = ObjectUrlTable::new();
    let url = table.insert("AbC123", blob(b"v1"));

    assert!(table.remove("AbC123"));
    assert!(!table.is_live(&url));
    assert!(!table.remove("AbC123"));
    assert_eq!(table.live_handles(), 0);
}

#[test]
fn test_clear_revokes_everything() {
    let mut table = ObjectUrlTable::new();
    let a = table.insert("a00001", blob(b"a"));
    let b = table.insert("b00001", blob(b"b"));

    table.clear();

    assert!(!table.is_live(&a));
    assert!(!table.is_live(&b));
    assert!(table.is_empty());
}

#[parameterized(
    png = { "png", "image/png" },
    jpg = { "jpg", "image/jpeg" },
    jpeg_upper = { "JPEG", "image/jpeg" },
    webp = { "webp", "image/webp" },
    unknown = { "bmpx", "application/octet-stream" },
)]
fn test_mime_for(extension: &str, expected: &str) {
    assert_eq!(mime_for(extension), expected);
}
