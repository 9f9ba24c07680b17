// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use tempfile::TempDir;
use yare::parameterized;

#[test]
fn test_empty_file_gives_defaults() {
    let config = Config::parse("").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.api_origin, DEFAULT_API_ORIGIN);
    assert_eq!(config.request_timeout(), Duration::from_secs(30));
    assert_eq!(config.images.batch_size, 8);
    assert_eq!(config.poll_interval(), Duration::from_millis(250));
}

#[test]
fn test_parse_full_config() {
    let config = Config::parse(
        r#"
api_origin = "https://wisssh.example/api"
data_dir = "/var/lib/wisssh"
request_timeout_secs = 5

[images]
batch_size = 4
poll_interval_ms = 1000
"#,
    )
    .unwrap();

    assert_eq!(config.api_origin, "https://wisssh.example/api");
    assert_eq!(config.session_path(), PathBuf::from("/var/lib/wisssh/session.json"));
    assert_eq!(config.request_timeout(), Duration::from_secs(5));
    assert_eq!(config.images.batch_size, 4);
    assert_eq!(config.poll_interval(), Duration::from_secs(1));
}

#[test]
fn test_partial_images_section_keeps_defaults() {
    let config = Config::parse("[images]\nbatch_size = 2\n").unwrap();
    assert_eq!(config.images.batch_size, 2);
    assert_eq!(config.images.poll_interval_ms, 250);
}

#[test]
fn test_parse_error_is_config_error() {
    let err = Config::parse("api_origin = [").unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert!(err.to_string().contains("failed to parse config"));
}

#[test]
fn test_missing_explicit_file_fails() {
    let temp = TempDir::new().unwrap();
    let err = Config::from_file(&temp.path().join("nope.toml")).unwrap_err();
    assert!(err.to_string().contains("failed to read"));
}

#[test]
fn test_overrides_replace_file_values() {
    let config = Config::parse("api_origin = \"http://file/api\"\n")
        .unwrap()
        .with_overrides(
            Some("http://env/api".into()),
            Some(PathBuf::from("/tmp/wisssh-env")),
        );

    assert_eq!(config.api_origin, "http://env/api");
    assert_eq!(config.data_dir(), PathBuf::from("/tmp/wisssh-env"));
}

#[test]
fn test_no_overrides_keep_file_values() {
    let config = Config::parse("api_origin = \"http://file/api\"\n")
        .unwrap()
        .with_overrides(None, None);
    assert_eq!(config.api_origin, "http://file/api");
    assert_eq!(config.data_dir(), default_data_dir());
}

#[parameterized(
    not_a_url = { "api_origin = \"localhost\"" },
    zero_batch = { "[images]\nbatch_size = 0" },
    zero_timeout = { "request_timeout_secs = 0" },
)]
fn test_validate_rejects(content: &str) {
    let config = Config::parse(content).unwrap();
    assert!(matches!(config.validate(), Err(Error::Config(_))));
}

#[test]
fn test_default_validates() {
    Config::default().validate().unwrap();
}
