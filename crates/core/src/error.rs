// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for wisssh-core operations.

use thiserror::Error;

/// All possible errors that can occur in wisssh-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid id '{id}': expected {len} characters from [A-Za-z0-9]")]
    InvalidId { id: String, len: usize },

    #[error("invalid stars: {0}\n  hint: a wish has between 0 and 3 stars")]
    InvalidStars(u8),

    #[error("invalid currency: '{0}'\n  hint: valid currencies are: rouble, dollar, euro")]
    InvalidCurrency(String),

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("failed to generate a unique id after {attempts} attempts")]
    IdGenerationFailed { attempts: usize },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for wisssh-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
