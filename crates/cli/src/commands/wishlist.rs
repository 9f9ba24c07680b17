// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use crate::api::Transport;
use crate::cli::WishlistArgs;
use crate::client::Client;
use crate::error::{Error, Result};
use crate::mutations::WishlistDraft;

fn apply_fields(draft: &mut WishlistDraft, fields: WishlistArgs) {
    if let Some(description) = fields.description {
        draft.description = description;
    }
    if let Some(date) = fields.date {
        draft.date = Some(date);
    }
    for id in fields.wish {
        if !draft.wishes.contains(&id) {
            draft.wishes.push(id);
        }
    }
}

pub async fn new<T: Transport + 'static>(
    client: &Client<T>,
    title: String,
    fields: WishlistArgs,
    out: &mut impl Write,
) -> Result<()> {
    let mut draft = WishlistDraft::new(title);
    apply_fields(&mut draft, fields);
    let wishlist = client.save_wishlist(draft).await?;
    writeln!(
        out,
        "Created wishlist {} (invite code {})",
        wishlist.id, wishlist.invitation_code
    )?;
    Ok(())
}

pub async fn edit<T: Transport + 'static>(
    client: &Client<T>,
    id: &str,
    title: Option<String>,
    fields: WishlistArgs,
    out: &mut impl Write,
) -> Result<()> {
    let wishlists = client.user_wishlists().await?;
    let wishlist = wishlists
        .iter()
        .find(|w| w.id == id)
        .ok_or_else(|| Error::WishlistNotFound(id.to_string()))?;

    let mut draft = WishlistDraft::from_wishlist(wishlist);
    if let Some(title) = title {
        draft.title = title;
    }
    apply_fields(&mut draft, fields);
    let saved = client.save_wishlist(draft).await?;
    writeln!(out, "Updated wishlist {}", saved.id)?;
    Ok(())
}

pub async fn delete<T: Transport + 'static>(
    client: &Client<T>,
    id: &str,
    out: &mut impl Write,
) -> Result<()> {
    client.delete_wishlist(id).await?;
    writeln!(out, "Deleted wishlist {}", id)?;
    Ok(())
}

pub async fn accept<T: Transport + 'static>(
    client: &Client<T>,
    code: &str,
    out: &mut impl Write,
) -> Result<()> {
    client.accept_invitation(code).await?;
    writeln!(out, "Joined wishlist with code {}", code)?;
    Ok(())
}

pub async fn decline<T: Transport + 'static>(
    client: &Client<T>,
    id: &str,
    out: &mut impl Write,
) -> Result<()> {
    client.decline_invitation(id).await?;
    writeln!(out, "Declined invitation {}", id)?;
    Ok(())
}
