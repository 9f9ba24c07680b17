// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use std::path::PathBuf;

#[test]
fn test_vars_constants() {
    assert_eq!(vars::WISSSH_CONFIG, "WISSSH_CONFIG");
    assert_eq!(vars::WISSSH_API_ORIGIN, "WISSSH_API_ORIGIN");
    assert_eq!(vars::WISSSH_DATA_DIR, "WISSSH_DATA_DIR");
    assert_eq!(vars::WISSSH_PASSWORD, "WISSSH_PASSWORD");
}

#[test]
fn test_config_path() {
    std::env::set_var("WISSSH_CONFIG", "/tmp/wisssh.toml");
    assert_eq!(config_path(), Some(PathBuf::from("/tmp/wisssh.toml")));
    std::env::remove_var("WISSSH_CONFIG");
    assert_eq!(config_path(), None);
}

#[test]
fn test_api_origin_ignores_blank() {
    std::env::set_var("WISSSH_API_ORIGIN", "  ");
    assert_eq!(api_origin(), None);
    std::env::set_var("WISSSH_API_ORIGIN", "https://wisssh.example/api");
    assert_eq!(api_origin().as_deref(), Some("https://wisssh.example/api"));
    std::env::remove_var("WISSSH_API_ORIGIN");
}

#[test]
fn test_data_dir() {
    std::env::set_var("WISSSH_DATA_DIR", "/tmp/wisssh-data");
    assert_eq!(data_dir(), Some(PathBuf::from("/tmp/wisssh-data")));
    std::env::remove_var("WISSSH_DATA_DIR");
}
