// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use thiserror::Error;

use crate::api::TransportError;

/// All possible errors that can occur in the wisssh library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not logged in\n  hint: run 'wisssh login <email>' first")]
    NotLoggedIn,

    #[error("session expired\n  hint: the refresh token was rejected, log in again")]
    SessionExpired,

    #[error("request to {path} failed with status {status}: {message}")]
    Http {
        status: u16,
        path: String,
        message: String,
    },

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Core(#[from] wisssh_core::Error),

    #[error("{what} is not cached yet\n  hint: query it before mutating it")]
    NotCached { what: String },

    #[error("wish not found: {0}")]
    WishNotFound(String),

    #[error("wishlist not found: {0}")]
    WishlistNotFound(String),

    #[error("no account is registered for {0}\n  hint: run 'wisssh signup' instead")]
    UnknownEmail(String),

    #[error("password cannot be empty\n  hint: pass --password or set WISSSH_PASSWORD")]
    EmptyPassword,

    #[error("cannot tell the image type of {0}\n  hint: use a file name ending in .jpg, .png or .webp")]
    UnknownImageType(String),

    /// A failure shared by every caller of a de-duplicated query.
    #[error("{0}")]
    Shared(Arc<Error>),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// HTTP status of the failed request, looking through shared errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            Error::Shared(inner) => inner.status(),
            _ => None,
        }
    }

    /// Returns true if the session was dropped because refreshing failed.
    pub fn is_session_expired(&self) -> bool {
        match self {
            Error::SessionExpired => true,
            Error::Shared(inner) => inner.is_session_expired(),
            _ => false,
        }
    }
}

/// A specialized Result type for wisssh operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
