// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use tracing::{debug, info, warn};
use wisssh_core::protocol::{paths, RefreshRequest};
use wisssh_core::TokenPair;

use super::transport::{ApiRequest, Transport};
use crate::session::TokenStore;

/// Exchange the refresh token for a new token pair.
///
/// Returns false on any failure; the caller is expected to end the session.
/// Must only run while holding the client's [`SingleFlight`](super::SingleFlight)
/// gate so that at most one refresh is in flight.
pub async fn reauth<T: Transport + ?Sized>(transport: &T, session: &TokenStore) -> bool {
    let Some(refresh_token) = session.refresh_token() else {
        debug!("no refresh token, cannot re-authenticate");
        return false;
    };

    let request = match ApiRequest::post(paths::REFRESH_TOKEN, &RefreshRequest { refresh_token }) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "failed to build refresh request");
            return false;
        }
    };

    let response = match transport.send(request, session.token()).await {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "token refresh failed");
            return false;
        }
    };

    if !response.is_success() {
        warn!(status = response.status, "token refresh rejected");
        return false;
    }

    let pair: TokenPair = match response.json() {
        Ok(pair) => pair,
        Err(e) => {
            warn!(error = %e, "malformed token refresh response");
            return false;
        }
    };

    match session.update_tokens(pair) {
        Ok(()) => {
            info!("access token refreshed");
            true
        }
        Err(e) => {
            warn!(error = %e, "failed to persist refreshed tokens");
            false
        }
    }
}
