// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared argument structs for CLI commands.
//!
//! Used with `#[command(flatten)]` so `new` and `edit` accept the same fields.

use clap::Args;
use wisssh_core::id::{validate_id, ID_LEN, INVITATION_CODE_LEN};
use wisssh_core::{Currency, Stars, WishlistDate};

/// Wish and wishlist ids.
pub(crate) fn parse_id(s: &str) -> Result<String, String> {
    validate_id(s, ID_LEN).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}

pub(crate) fn parse_invitation_code(s: &str) -> Result<String, String> {
    validate_id(s, INVITATION_CODE_LEN).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}

fn parse_stars(s: &str) -> Result<Stars, String> {
    let value: u8 = s.parse().map_err(|_| format!("not a number: {}", s))?;
    Stars::new(value).map_err(|e| e.to_string())
}

fn parse_currency(s: &str) -> Result<Currency, String> {
    s.parse().map_err(|e: wisssh_core::Error| e.to_string())
}

fn parse_date(s: &str) -> Result<WishlistDate, String> {
    s.parse().map_err(|e: wisssh_core::Error| e.to_string())
}

/// Password source for login and signup.
#[derive(Args, Clone, Debug, Default)]
pub struct PasswordArgs {
    /// Password (read from stdin when omitted)
    #[arg(long, env = crate::env::vars::WISSSH_PASSWORD, hide_env_values = true)]
    pub password: Option<String>,

    /// Keep the session only for this process
    #[arg(long)]
    pub no_remember: bool,
}

/// Optional wish fields.
#[derive(Args, Clone, Debug, Default)]
pub struct WishArgs {
    /// Longer description
    #[arg(long, short)]
    pub description: Option<String>,

    /// Link to the item in a shop
    #[arg(long)]
    pub link: Option<String>,

    /// How much you want it (0-3)
    #[arg(long, value_parser = parse_stars)]
    pub stars: Option<Stars>,

    /// Price in --currency
    #[arg(long)]
    pub price: Option<f64>,

    /// rouble, dollar or euro
    #[arg(long, value_parser = parse_currency)]
    pub currency: Option<Currency>,

    /// Add the wish to this wishlist (comma-separated or repeated)
    #[arg(long, short = 'w', value_delimiter = ',', value_name = "id", value_parser = parse_id)]
    pub wishlist: Vec<String>,
}

/// Optional wishlist fields.
#[derive(Args, Clone, Debug, Default)]
pub struct WishlistArgs {
    /// Longer description
    #[arg(long, short)]
    pub description: Option<String>,

    /// Event date as dd.mm.yyyy
    #[arg(long, value_parser = parse_date)]
    pub date: Option<WishlistDate>,

    /// Put this wish on the list (comma-separated or repeated)
    #[arg(long, value_delimiter = ',', value_name = "id", value_parser = parse_id)]
    pub wish: Vec<String>,
}
