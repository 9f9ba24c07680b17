// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! wisssh - data-sync layer of the Wisssh wishlist client.
//!
//! This crate keeps a signed-in user's wishes, wishlists, friends and
//! invitations in sync with the REST backend, and provides the `wisssh` CLI
//! on top of it.
//!
//! # Main Components
//!
//! - [`TokenStore`](session::TokenStore) - access/refresh tokens in durable or scoped storage
//! - [`ApiClient`](api::ApiClient) - requests with one refresh-and-replay on 403
//! - [`QueryLayer`](queries::QueryLayer) - cached, de-duplicated reads
//! - [`Mutations`](mutations::Mutations) - optimistic writes with ordered undo
//! - [`ImagePipeline`](images::ImagePipeline) - batched image loading with handle revocation
//! - [`Client`] - the facade tying them together
//!
//! ```rust,ignore
//! use wisssh::{Client, Config};
//!
//! let config = Config::load(None)?;
//! let client = wisssh::commands::open_client(&config)?;
//! let wishes = client.user_wishes().await?;
//! ```

pub mod api;
pub mod auth;
pub mod cache;
mod cli;
pub mod client;
pub mod commands;
pub mod config;
mod display;
pub mod env;
pub mod error;
mod help;
pub mod images;
pub mod mutations;
pub mod queries;
pub mod session;

#[cfg(test)]
mod test_helpers;

pub use auth::AuthStep;
pub use cli::{
    Cli, Command, PasswordArgs, WishArgs, WishCommand, WishlistArgs, WishlistCommand,
};
pub use client::Client;
pub use config::Config;
pub use error::{Error, Result};

use clap::CommandFactory;
use clap_complete::generate;

/// Run a parsed command line to completion.
pub fn run(cli: Cli) -> Result<()> {
    if let Command::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "wisssh", &mut std::io::stdout());
        return Ok(());
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(commands::run(cli.config.as_deref(), cli.command))
}
