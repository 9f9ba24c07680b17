// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Request layer: bearer token, 403 handling, typed JSON helpers.

use std::collections::HashSet;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use wisssh_core::protocol::paths;

use super::gate::SingleFlight;
use super::reauth::reauth;
use super::transport::{ApiRequest, ApiResponse, Transport};
use crate::error::{Error, Result};
use crate::session::TokenStore;

/// Authenticated API client.
///
/// Every request carries the current token. A 403 triggers at most one
/// token refresh across all concurrent requests, after which each affected
/// request is replayed exactly once.
pub struct ApiClient<T: Transport> {
    transport: T,
    session: Arc<TokenStore>,
    gate: SingleFlight,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, session: Arc<TokenStore>) -> Self {
        ApiClient {
            transport,
            session,
            gate: SingleFlight::new(),
        }
    }

    pub fn session(&self) -> &Arc<TokenStore> {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a request, refreshing the token and replaying once on 403.
    ///
    /// Non-2xx responses become [`Error::Http`]. A failed refresh ends the
    /// session and returns [`Error::SessionExpired`].
    pub async fn request(&self, request: ApiRequest) -> Result<ApiResponse> {
        // A refresh in flight makes the current token useless
        self.gate.wait_for_unlock().await;

        let sent_with = self.session.token();
        let response = self
            .transport
            .send(request.clone(), sent_with.clone())
            .await?;
        if !response.is_forbidden() {
            return check(&request, response);
        }

        debug!(path = %request.path, "request forbidden, re-authenticating");
        match self.gate.try_acquire() {
            Some(guard) => {
                let current = self.session.token();
                if current.is_none() {
                    return Err(Error::SessionExpired);
                }
                if current != sent_with {
                    debug!(path = %request.path, "token refreshed meanwhile, replaying");
                } else if !reauth(&self.transport, &self.session).await {
                    drop(guard);
                    self.expire();
                    return Err(Error::SessionExpired);
                }
                drop(guard);
            }
            None => {
                self.gate.wait_for_unlock().await;
                if !self.session.is_authenticated() {
                    return Err(Error::SessionExpired);
                }
            }
        }

        let replayed = self
            .transport
            .send(request.clone(), self.session.token())
            .await?;
        check(&request, replayed)
    }

    /// Send a request without a token and without the 403 handling.
    ///
    /// Used by the login and signup endpoints, where a 403 means bad
    /// credentials rather than an expired token.
    pub async fn request_public(&self, request: ApiRequest) -> Result<ApiResponse> {
        let response = self.transport.send(request.clone(), None).await?;
        check(&request, response)
    }

    /// GET `path` and decode the JSON body.
    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        let response = self.request(ApiRequest::get(path)).await?;
        Ok(response.json()?)
    }

    /// POST a JSON body and return the raw response.
    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        self.request(ApiRequest::post(path, body)?).await
    }

    /// POST a JSON body and decode the JSON response.
    pub async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R> {
        let response = self.post(path, body).await?;
        Ok(response.json()?)
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse> {
        self.request(ApiRequest::delete(path)).await
    }

    /// Generate an id of `len` characters that the server does not know yet.
    pub async fn unique_id(&self, len: usize) -> Result<String> {
        let taken: HashSet<String> = self
            .get_json::<Vec<String>>(paths::ALL_IDS)
            .await?
            .into_iter()
            .collect();
        let id = wisssh_core::generate_unique_id(&mut rand::thread_rng(), len, |candidate| {
            taken.contains(candidate)
        })?;
        Ok(id)
    }

    fn expire(&self) {
        if let Err(e) = self.session.logout() {
            warn!(error = %e, "failed to clear expired session");
        }
    }
}

fn check(request: &ApiRequest, response: ApiResponse) -> Result<ApiResponse> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(Error::Http {
            status: response.status,
            path: request.path.clone(),
            message: response.text(),
        })
    }
}
