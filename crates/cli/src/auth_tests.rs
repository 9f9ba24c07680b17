// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::sync::Arc;

use serde_json::json;
use wisssh_core::protocol::paths;

use super::*;
use crate::cache::QueryKey;
use crate::session::{FileStorage, KeyValueStorage, MemoryStorage, TokenStore, TOKEN_KEY};
use crate::test_helpers::{
    json_body, logged_in_session, ok_json, status, tokens, user, MockTransport,
};

/// Backend that knows only `known@b.com` (as "bob").
fn auth_backend() -> MockTransport {
    MockTransport::new(|request, _| match request.path.as_str() {
        "auth/get-username-by-email/known@b.com" => ok_json(&json!({"name": "bob"})),
        p if p.starts_with(paths::USERNAME_BY_EMAIL) => ok_json(&json!({"name": null})),
        paths::SIGNUP => status(200),
        paths::LOGIN => ok_json(&tokens("t1", "r1")),
        _ => status(404),
    })
}

fn anonymous(transport: &MockTransport) -> Client<MockTransport> {
    Client::new(transport.clone(), Arc::new(TokenStore::in_memory()))
}

#[tokio::test]
async fn test_lookup_known_email_goes_to_login() {
    let transport = auth_backend();
    let client = anonymous(&transport);

    let step = client.lookup_email(" known@b.com ").await.unwrap();

    assert_eq!(
        step,
        AuthStep::Login {
            email: "known@b.com".into(),
            name: "bob".into()
        }
    );
}

#[tokio::test]
async fn test_unknown_email_signs_up_then_logs_in() {
    let dir = tempfile::tempdir().unwrap();
    let session_file = dir.path().join("session.json");
    let session = Arc::new(TokenStore::new(
        Box::new(FileStorage::open(&session_file).unwrap()),
        Box::new(MemoryStorage::new()),
    ));
    let transport = auth_backend();
    let client = Client::new(transport.clone(), session.clone());

    let step = client.lookup_email("a@b.com").await.unwrap();
    assert_eq!(
        step,
        AuthStep::Signup {
            email: "a@b.com".into()
        }
    );

    client.signup("a@b.com", "alice", "p1", true).await.unwrap();

    let calls: Vec<_> = transport
        .calls()
        .into_iter()
        .filter(|c| c.path == paths::SIGNUP || c.path == paths::LOGIN)
        .collect();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].path, paths::SIGNUP);
    assert_eq!(
        json_body(&calls[0]),
        json!({"email": "a@b.com", "name": "alice", "password": "p1"})
    );
    assert_eq!(calls[1].path, paths::LOGIN);
    assert_eq!(
        json_body(&calls[1]),
        json!({"email": "a@b.com", "password": "p1"})
    );

    assert!(session.remember());
    assert_eq!(session.token().as_deref(), Some("t1"));
    let durable = FileStorage::open(&session_file).unwrap();
    assert_eq!(durable.get(TOKEN_KEY).as_deref(), Some("t1"));
}

#[tokio::test]
async fn test_lookup_not_found_means_signup() {
    let transport = MockTransport::new(|_, _| status(404));
    let client = anonymous(&transport);

    let step = client.lookup_email("x@y.z").await.unwrap();

    assert!(matches!(step, AuthStep::Signup { .. }));
}

#[tokio::test]
async fn test_failed_signup_skips_login() {
    let transport = MockTransport::new(|_, _| status(409));
    let client = anonymous(&transport);

    let err = client.signup("a@b.com", "alice", "p1", true).await.unwrap_err();

    assert_eq!(err.status(), Some(409));
    assert_eq!(transport.count(paths::LOGIN), 0);
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn test_login_without_remember_keeps_token_scoped() {
    let transport = auth_backend();
    let client = anonymous(&transport);

    client.login("known@b.com", "pw", false).await.unwrap();

    assert!(!client.session().remember());
    assert_eq!(client.session().token().as_deref(), Some("t1"));
}

#[tokio::test]
async fn test_wrong_password_does_not_refresh() {
    let transport = MockTransport::new(|_, _| status(403));
    let client = anonymous(&transport);

    let err = client.login("known@b.com", "bad", true).await.unwrap_err();

    assert_eq!(err.status(), Some(403));
    assert_eq!(transport.count(paths::REFRESH_TOKEN), 0);
}

#[tokio::test]
async fn test_logout_clears_session_cache_and_images() {
    let transport = MockTransport::new(|request, _| match request.path.as_str() {
        paths::CURRENT_USER => {
            let mut me = user("me0001", "alice");
            me.image_extension = Some("png".into());
            ok_json(&me)
        }
        _ => status(200),
    });
    let client = Client::new(transport.clone(), logged_in_session());
    client.current_user().await.unwrap();
    client.images().tick().await;
    let avatar = client.images().url("me0001").unwrap();

    client.logout().unwrap();

    assert!(!client.session().is_authenticated());
    assert!(client.cache().data(&QueryKey::current_user()).is_none());
    assert!(!client.images().is_live(&avatar));
}

#[tokio::test]
async fn test_password_reset_endpoints() {
    let transport = MockTransport::new(|_, _| status(200));
    let client = anonymous(&transport);

    client.send_password_reset("a@b.com").await.unwrap();
    client.verify_password_reset("123456").await.unwrap();

    let calls = transport.calls();
    assert_eq!(calls[0].path, paths::PASSWORD_RESET_EMAIL);
    assert_eq!(json_body(&calls[0]), json!({"email": "a@b.com"}));
    assert_eq!(calls[1].path, "mail/verificate-password-reset/123456");
}
