// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod account;
pub mod show;
pub mod wish;
pub mod wishlist;

use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::api::{ReqwestTransport, Transport};
use crate::cli::{Command, PasswordArgs, WishCommand, WishlistCommand};
use crate::client::Client;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::session::{FileStorage, MemoryStorage, TokenStore};

/// Build a client from the configuration and the stored session.
///
/// The durable session lives in `session.json` under the data dir; scoped
/// storage only lasts as long as the process.
pub fn open_client(config: &Config) -> Result<Client<ReqwestTransport>> {
    let durable = FileStorage::open(&config.session_path())?;
    let session = TokenStore::load(Box::new(durable), Box::new(MemoryStorage::new()));
    let transport = ReqwestTransport::new(&config.api_origin, config.request_timeout())?;
    Ok(Client::with_batch_size(
        transport,
        Arc::new(session),
        config.images.batch_size,
    ))
}

/// Run one CLI command against the configured backend.
pub async fn run(config_path: Option<&Path>, command: Command) -> Result<()> {
    let config = Config::load(config_path)?;
    let client = open_client(&config)?;
    let mut out = std::io::stdout().lock();
    dispatch(&client, &config, command, &mut out).await
}

pub(crate) async fn dispatch<T: Transport + 'static>(
    client: &Client<T>,
    config: &Config,
    command: Command,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Login { email, password } => {
            let secret = read_password(&password, &mut std::io::stdin().lock())?;
            account::login(client, &email, &secret, !password.no_remember, out).await
        }
        Command::Signup {
            email,
            name,
            password,
        } => {
            let secret = read_password(&password, &mut std::io::stdin().lock())?;
            account::signup(client, &email, &name, &secret, !password.no_remember, out).await
        }
        Command::Logout => account::logout(client, out),
        Command::Whoami => account::whoami(client, out).await,
        Command::Profile { name, avatar } => {
            account::profile(client, name, avatar.as_deref(), out).await
        }
        Command::ResetPassword { email, code } => {
            account::reset_password(client, &email, code.as_deref(), out).await
        }
        Command::Friends => show::friends(client, out).await,
        Command::Wishes { friend, covers } => {
            let wait = covers.then(|| config.poll_interval());
            show::wishes(client, friend.as_deref(), wait, out).await
        }
        Command::Wishlists => show::wishlists(client, out).await,
        Command::Invites => show::invites(client, out).await,
        Command::Usernames => show::usernames(client, out).await,
        Command::Wish(cmd) => match cmd {
            WishCommand::New {
                title,
                fields,
                cover,
            } => wish::new(client, title, fields, cover.as_deref(), out).await,
            WishCommand::Edit {
                id,
                title,
                fields,
                clear_wishlists,
                cover,
            } => {
                let edit = wish::WishEdit {
                    title,
                    fields,
                    clear_wishlists,
                };
                wish::edit(client, &id, edit, cover.as_deref(), out).await
            }
            WishCommand::Delete { id } => wish::delete(client, &id, out).await,
            WishCommand::Complete { id } => wish::complete(client, &id, out).await,
            WishCommand::Uncomplete { id } => wish::uncomplete(client, &id, out).await,
            WishCommand::Reserve { id } => wish::reserve(client, &id, out).await,
            WishCommand::Unreserve { id } => wish::unreserve(client, &id, out).await,
        },
        Command::Wishlist(cmd) => match cmd {
            WishlistCommand::New { title, fields } => {
                wishlist::new(client, title, fields, out).await
            }
            WishlistCommand::Edit { id, title, fields } => {
                wishlist::edit(client, &id, title, fields, out).await
            }
            WishlistCommand::Delete { id } => wishlist::delete(client, &id, out).await,
            WishlistCommand::Accept { code } => wishlist::accept(client, &code, out).await,
            WishlistCommand::Decline { id } => wishlist::decline(client, &id, out).await,
        },
        // Handled before a client is built
        Command::Completions { .. } => Ok(()),
    }
}

/// The password from `--password`/`$WISSSH_PASSWORD`, else one line of `input`.
pub(crate) fn read_password(args: &PasswordArgs, input: &mut impl BufRead) -> Result<String> {
    if let Some(password) = &args.password {
        return Ok(password.clone());
    }
    eprint!("password: ");
    let mut line = String::new();
    input.read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        return Err(Error::EmptyPassword);
    }
    Ok(password)
}

/// Extension (lowercased) and content of an image file.
pub(crate) fn read_image(path: &Path) -> Result<(String, Vec<u8>)> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(str::to_lowercase)
        .ok_or_else(|| Error::UnknownImageType(path.display().to_string()))?;
    let bytes = std::fs::read(path)?;
    Ok((extension, bytes))
}

pub(crate) fn print_lines(out: &mut impl Write, lines: &[String]) -> Result<()> {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Fetch queued images batch by batch, pausing `period` between batches.
pub(crate) async fn load_images<T: Transport + 'static>(client: &Client<T>, period: Duration) {
    loop {
        client.images().tick().await;
        if client.images().pending() == 0 {
            break;
        }
        tokio::time::sleep(period).await;
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
