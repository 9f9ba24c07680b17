// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by the client are defined here
//! with typed accessor functions. The variable name constants are generated
//! by `build.rs` and live in the [`vars`] submodule.

use std::path::PathBuf;

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

/// Returns the value of `WISSSH_CONFIG` if set.
pub fn config_path() -> Option<PathBuf> {
    std::env::var(vars::WISSSH_CONFIG).ok().map(PathBuf::from)
}

/// Returns the value of `WISSSH_API_ORIGIN` if set and non-empty.
pub fn api_origin() -> Option<String> {
    std::env::var(vars::WISSSH_API_ORIGIN)
        .ok()
        .filter(|v| !v.trim().is_empty())
}

/// Returns the value of `WISSSH_DATA_DIR` if set.
pub fn data_dir() -> Option<PathBuf> {
    std::env::var(vars::WISSSH_DATA_DIR).ok().map(PathBuf::from)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
