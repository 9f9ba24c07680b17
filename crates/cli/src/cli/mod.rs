// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod args;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::help;

use args::{parse_id, parse_invitation_code};
pub use args::{PasswordArgs, WishArgs, WishlistArgs};

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

#[derive(Parser)]
#[command(name = "wisssh")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Keep your wishes, wishlists and friends' wishes in sync")]
#[command(styles = help::styles())]
#[command(after_help = help::examples("\
Examples:
  wisssh login me@example.com    Log in (prompts for the password on stdin)
  wisssh wishes                  List your wishes
  wisssh wish new \"Bike\"         Add a wish
  wisssh wishlist new \"Party\"    Create a wishlist"))]
pub struct Cli {
    /// Read configuration from <path>
    #[arg(long, global = true, value_name = "path")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Log in with an existing account
    Login {
        /// Account email
        #[arg(value_parser = non_empty_string)]
        email: String,

        #[command(flatten)]
        password: PasswordArgs,
    },

    /// Create an account and log in
    Signup {
        /// Account email
        #[arg(value_parser = non_empty_string)]
        email: String,

        /// Display name
        #[arg(value_parser = non_empty_string)]
        name: String,

        #[command(flatten)]
        password: PasswordArgs,
    },

    /// Forget the stored session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Update your display name or avatar
    Profile {
        /// New display name
        #[arg(long, value_parser = non_empty_string)]
        name: Option<String>,

        /// Upload this file as the new avatar
        #[arg(long, value_name = "file")]
        avatar: Option<PathBuf>,
    },

    /// List your friends
    Friends,

    /// List your wishes, or a friend's
    Wishes {
        /// Show the wishes of this friend instead
        #[arg(long, value_name = "id")]
        friend: Option<String>,

        /// Also download covers and show their object URLs
        #[arg(long)]
        covers: bool,
    },

    /// List your wishlists
    Wishlists,

    /// List wishlists you were invited to
    Invites,

    /// List every registered username
    Usernames,

    /// Create, edit and act on wishes
    #[command(subcommand)]
    Wish(WishCommand),

    /// Create, edit and share wishlists
    #[command(subcommand)]
    Wishlist(WishlistCommand),

    /// Request a password reset mail, or confirm one with --code
    #[command(after_help = help::examples("\
Examples:
  wisssh reset-password me@example.com           Send the reset mail
  wisssh reset-password me@example.com --code X  Confirm with the mailed code"))]
    ResetPassword {
        /// Account email
        #[arg(value_parser = non_empty_string)]
        email: String,

        /// Code from the reset mail
        #[arg(long)]
        code: Option<String>,
    },

    /// Generate shell completions
    #[command(after_help = help::examples("\
Examples:
  wisssh completions bash > ~/.local/share/bash-completion/completions/wisssh
  wisssh completions zsh > ~/.zfunc/_wisssh"))]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum WishCommand {
    /// Add a wish
    New {
        #[arg(value_parser = non_empty_string)]
        title: String,

        #[command(flatten)]
        fields: WishArgs,

        /// Upload this file as the cover
        #[arg(long, value_name = "file")]
        cover: Option<PathBuf>,
    },

    /// Change an existing wish
    Edit {
        #[arg(value_parser = parse_id)]
        id: String,

        /// New title
        #[arg(long, value_parser = non_empty_string)]
        title: Option<String>,

        #[command(flatten)]
        fields: WishArgs,

        /// Remove the wish from every wishlist before applying --wishlist
        #[arg(long)]
        clear_wishlists: bool,

        /// Upload this file as the cover
        #[arg(long, value_name = "file")]
        cover: Option<PathBuf>,
    },

    /// Delete a wish
    Delete {
        #[arg(value_parser = parse_id)]
        id: String,
    },

    /// Mark a wish as fulfilled
    Complete {
        #[arg(value_parser = parse_id)]
        id: String,
    },

    /// Mark a fulfilled wish as wanted again
    Uncomplete {
        #[arg(value_parser = parse_id)]
        id: String,
    },

    /// Reserve a friend's wish
    Reserve {
        #[arg(value_parser = parse_id)]
        id: String,
    },

    /// Release your reservation
    Unreserve {
        #[arg(value_parser = parse_id)]
        id: String,
    },
}

#[derive(Subcommand)]
pub enum WishlistCommand {
    /// Create a wishlist
    New {
        #[arg(value_parser = non_empty_string)]
        title: String,

        #[command(flatten)]
        fields: WishlistArgs,
    },

    /// Change an existing wishlist
    Edit {
        #[arg(value_parser = parse_id)]
        id: String,

        /// New title
        #[arg(long, value_parser = non_empty_string)]
        title: Option<String>,

        #[command(flatten)]
        fields: WishlistArgs,
    },

    /// Delete a wishlist
    Delete {
        #[arg(value_parser = parse_id)]
        id: String,
    },

    /// Join a wishlist by its invitation code
    Accept {
        #[arg(value_parser = parse_invitation_code)]
        code: String,
    },

    /// Decline an invitation
    Decline {
        #[arg(value_parser = parse_id)]
        id: String,
    },
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
