// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Session tokens and their persistence.
//!
//! [`TokenStore`] holds `{ token, refresh_token, remember }` and writes every
//! change through to storage:
//!
//! - the access token goes to durable storage when `remember` is set,
//!   otherwise to session-scoped storage
//! - the refresh token always goes to durable storage
//! - logout wipes both stores and resets `remember` to true

mod storage;

pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};

use std::sync::Mutex;

use tracing::info;
use wisssh_core::TokenPair;

use crate::error::Result;

/// Storage key of the access token.
pub const TOKEN_KEY: &str = "token";
/// Storage key of the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// In-memory view of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    /// Whether the access token should outlive the process.
    pub remember: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState {
            token: None,
            refresh_token: None,
            remember: true,
        }
    }
}

/// Holds the current tokens and persists them.
pub struct TokenStore {
    state: Mutex<SessionState>,
    durable: Box<dyn KeyValueStorage>,
    scoped: Box<dyn KeyValueStorage>,
}

impl TokenStore {
    /// Create an empty store over the given backends.
    pub fn new(durable: Box<dyn KeyValueStorage>, scoped: Box<dyn KeyValueStorage>) -> Self {
        TokenStore {
            state: Mutex::new(SessionState::default()),
            durable,
            scoped,
        }
    }

    /// Create a store and restore any session previously persisted.
    pub fn load(durable: Box<dyn KeyValueStorage>, scoped: Box<dyn KeyValueStorage>) -> Self {
        let (token, remember) = match durable.get(TOKEN_KEY) {
            Some(token) => (Some(token), true),
            None => match scoped.get(TOKEN_KEY) {
                Some(token) => (Some(token), false),
                None => (None, true),
            },
        };
        let refresh_token = durable.get(REFRESH_TOKEN_KEY);

        TokenStore {
            state: Mutex::new(SessionState {
                token,
                refresh_token,
                remember,
            }),
            durable,
            scoped,
        }
    }

    /// In-memory only store, used when nothing should touch the disk.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStorage::new()), Box::new(MemoryStorage::new()))
    }

    pub fn snapshot(&self) -> SessionState {
        self.lock().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.lock().token.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.lock().refresh_token.clone()
    }

    pub fn remember(&self) -> bool {
        self.lock().remember
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().token.is_some()
    }

    /// Choose where the next token write goes.
    pub fn set_remember(&self, remember: bool) {
        self.lock().remember = remember;
    }

    /// Store the tokens issued by a login.
    pub fn login(&self, pair: TokenPair) -> Result<()> {
        self.store(pair)?;
        info!(remember = self.remember(), "session started");
        Ok(())
    }

    /// Store the tokens issued by a refresh.
    pub fn update_tokens(&self, pair: TokenPair) -> Result<()> {
        self.store(pair)
    }

    /// Forget everything, in memory and in both stores.
    pub fn logout(&self) -> Result<()> {
        {
            let mut state = self.lock();
            *state = SessionState::default();
        }
        self.durable.remove(TOKEN_KEY)?;
        self.durable.remove(REFRESH_TOKEN_KEY)?;
        self.scoped.remove(TOKEN_KEY)?;
        info!("session cleared");
        Ok(())
    }

    fn store(&self, pair: TokenPair) -> Result<()> {
        let remember = {
            let mut state = self.lock();
            state.token = Some(pair.token.clone());
            state.refresh_token = Some(pair.refresh_token.clone());
            state.remember
        };

        if remember {
            self.durable.set(TOKEN_KEY, &pair.token)?;
            self.scoped.remove(TOKEN_KEY)?;
        } else {
            self.scoped.set(TOKEN_KEY, &pair.token)?;
            self.durable.remove(TOKEN_KEY)?;
        }
        self.durable.set(REFRESH_TOKEN_KEY, &pair.refresh_token)?;
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
