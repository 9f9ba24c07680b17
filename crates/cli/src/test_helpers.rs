// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers: a scripted transport and entity fixtures.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};
use serde::Serialize;
use wisssh_core::{Currency, Stars, TokenPair, User, Wish, Wishlist};

use crate::api::{ApiRequest, ApiResponse, Body, Method, Transport, TransportResult};
use crate::cache::{QueryData, QueryKey, SharedCache};
use crate::session::TokenStore;

type Handler = dyn Fn(&ApiRequest, Option<&str>) -> TransportResult<ApiResponse> + Send + Sync;

/// A request seen by [`MockTransport`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub token: Option<String>,
    pub body: Body,
}

/// Mock transport for testing without real sockets.
///
/// Every request is recorded, then the task yields once before the handler
/// answers, so concurrent requests interleave the way real ones do.
#[derive(Clone)]
pub struct MockTransport {
    handler: Arc<Handler>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockTransport {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&ApiRequest, Option<&str>) -> TransportResult<ApiResponse> + Send + Sync + 'static,
    {
        MockTransport {
            handler: Arc::new(handler),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get all requests that were sent.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of requests sent to exactly `path`.
    pub fn count(&self, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.path == path)
            .count()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }
}

impl Transport for MockTransport {
    fn send(
        &self,
        request: ApiRequest,
        token: Option<String>,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = TransportResult<ApiResponse>> + Send + '_>,
    > {
        Box::pin(async move {
            self.calls.lock().unwrap().push(RecordedCall {
                method: request.method,
                path: request.path.clone(),
                token: token.clone(),
                body: request.body.clone(),
            });
            tokio::task::yield_now().await;
            (self.handler)(&request, token.as_deref())
        })
    }
}

/// 200 response with a JSON body.
pub fn ok_json<T: Serialize>(value: &T) -> TransportResult<ApiResponse> {
    Ok(ApiResponse::new(200, serde_json::to_vec(value).unwrap()))
}

/// Empty response with the given status.
pub fn status(code: u16) -> TransportResult<ApiResponse> {
    Ok(ApiResponse::new(code, Vec::new()))
}

/// JSON body of a recorded call.
pub fn json_body(call: &RecordedCall) -> serde_json::Value {
    match &call.body {
        Body::Json(value) => value.clone(),
        other => panic!("expected JSON body, got {:?}", other),
    }
}

pub fn tokens(token: &str, refresh: &str) -> TokenPair {
    TokenPair {
        token: token.into(),
        refresh_token: refresh.into(),
    }
}

/// An in-memory session holding token "t1" and refresh token "r1".
pub fn logged_in_session() -> Arc<TokenStore> {
    let store = TokenStore::in_memory();
    store.login(tokens("t1", "r1")).unwrap();
    Arc::new(store)
}

pub fn user(id: &str, name: &str) -> User {
    User {
        id: id.into(),
        name: name.into(),
        email: format!("{}@example.com", name),
        image_extension: None,
        wishes: Vec::new(),
        wishlists: Vec::new(),
        invites: Vec::new(),
    }
}

pub fn wish(id: &str, author: &str) -> Wish {
    let created = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
    Wish {
        id: id.into(),
        author: author.into(),
        title: format!("Wish {}", id),
        description: String::new(),
        external: String::new(),
        image_extension: None,
        image_ar: 1.0,
        stars: Stars::default(),
        price: Some(10.0),
        currency: Currency::Rouble,
        in_wishlists: Vec::new(),
        reserved_by: None,
        is_completed: false,
        completed_at: None,
        created_at: created,
        last_modified_at: created,
    }
}

pub fn wishlist(id: &str, author: &str) -> Wishlist {
    Wishlist {
        id: id.into(),
        author: author.into(),
        invitation_code: "abcdefghijk".into(),
        title: format!("Wishlist {}", id),
        description: String::new(),
        date: None,
        wishes: Vec::new(),
    }
}

/// Id of the logged-in user in [`seeded_cache`].
pub const ME: &str = "me0001";
/// Id of the only friend in [`seeded_cache`].
pub const FRIEND: &str = "fr0001";

/// A cache as it looks after the usual startup queries.
///
/// - wishes `AbC123` (in no wishlist) and `Def456` (in `Lst002`)
/// - wishlists `Xy9Z1w` (empty) and `Lst002` (holding `Def456`)
/// - one invitation `Inv001` and one friend wish `Frw001`
pub fn seeded_cache() -> SharedCache {
    let cache = SharedCache::new();
    {
        let mut c = cache.lock();

        let mut me = user(ME, "alice");
        me.wishes = vec!["AbC123".into(), "Def456".into()];
        me.wishlists = vec!["Xy9Z1w".into(), "Lst002".into()];
        me.invites = vec!["Inv001".into()];
        c.fulfill(&QueryKey::current_user(), Arc::new(QueryData::User(me)));

        let mut second = wish("Def456", ME);
        second.in_wishlists = vec!["Lst002".into()];
        c.fulfill(
            &QueryKey::user_wishes(),
            Arc::new(QueryData::Wishes(vec![wish("AbC123", ME), second])),
        );

        let mut holding = wishlist("Lst002", ME);
        holding.wishes = vec!["Def456".into()];
        c.fulfill(
            &QueryKey::user_wishlists(),
            Arc::new(QueryData::Wishlists(vec![wishlist("Xy9Z1w", ME), holding])),
        );

        c.fulfill(
            &QueryKey::invites(),
            Arc::new(QueryData::Wishlists(vec![wishlist("Inv001", FRIEND)])),
        );
        c.fulfill(
            &QueryKey::friend_wishes(FRIEND),
            Arc::new(QueryData::Wishes(vec![wish("Frw001", FRIEND)])),
        );
        c.fulfill(
            &QueryKey::friends(),
            Arc::new(QueryData::Users(vec![user(FRIEND, "bob")])),
        );
    }
    cache
}

/// Every entry's data, for before/after comparisons.
pub fn cache_state(cache: &SharedCache) -> Vec<(QueryKey, Option<QueryData>)> {
    let c = cache.lock();
    c.keys()
        .map(|key| (key.clone(), c.data(key).map(|d| QueryData::clone(&d))))
        .collect()
}

/// Backend answering `ids/all` with no ids and everything else with `code`.
pub fn mutation_backend(code: u16) -> MockTransport {
    MockTransport::new(move |request, _| {
        if request.path == wisssh_core::protocol::paths::ALL_IDS {
            ok_json(&Vec::<String>::new())
        } else {
            status(code)
        }
    })
}

/// Mutation engine over `cache`, logged in as [`ME`].
pub fn mutations(
    transport: &MockTransport,
    cache: &SharedCache,
) -> crate::mutations::Mutations<MockTransport> {
    let api = Arc::new(crate::api::ApiClient::new(
        transport.clone(),
        logged_in_session(),
    ));
    crate::mutations::Mutations::new(api, cache.clone())
}
