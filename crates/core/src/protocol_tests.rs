// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use serde_json::json;

#[test]
fn test_token_pair_wire_format() {
    let pair: TokenPair =
        serde_json::from_value(json!({"token": "t1", "refreshToken": "r1"})).unwrap();
    assert_eq!(pair.token, "t1");
    assert_eq!(pair.refresh_token, "r1");
}

#[test]
fn test_refresh_request_wire_format() {
    let body = serde_json::to_value(RefreshRequest {
        refresh_token: "r1".into(),
    })
    .unwrap();
    assert_eq!(body, json!({"refreshToken": "r1"}));
}

#[test]
fn test_wish_action_wire_format() {
    let body = serde_json::to_value(WishActionRequest {
        wish_id: "AbC123".into(),
    })
    .unwrap();
    assert_eq!(body, json!({"wishId": "AbC123"}));
}

#[test]
fn test_username_lookup_null_name() {
    let lookup: UsernameLookup = serde_json::from_value(json!({"name": null})).unwrap();
    assert!(lookup.name.is_none());
    let lookup: UsernameLookup = serde_json::from_value(json!({})).unwrap();
    assert!(lookup.name.is_none());
    let lookup: UsernameLookup = serde_json::from_value(json!({"name": "alice"})).unwrap();
    assert_eq!(lookup.name.as_deref(), Some("alice"));
}

#[test]
fn test_paths_are_relative() {
    for path in [paths::LOGIN, paths::CURRENT_USER, paths::ALL_IDS, paths::INVITES] {
        assert!(!path.starts_with('/'), "{} should be relative", path);
    }
}
