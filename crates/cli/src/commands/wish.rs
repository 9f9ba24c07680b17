// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;
use std::path::Path;

use wisssh_core::ImageKind;

use super::read_image;
use crate::api::Transport;
use crate::cli::WishArgs;
use crate::client::Client;
use crate::error::{Error, Result};
use crate::mutations::WishDraft;

/// Changes requested by `wish edit`.
#[derive(Debug, Default)]
pub struct WishEdit {
    pub title: Option<String>,
    pub fields: WishArgs,
    pub clear_wishlists: bool,
}

fn apply_fields(draft: &mut WishDraft, fields: WishArgs) {
    if let Some(description) = fields.description {
        draft.description = description;
    }
    if let Some(link) = fields.link {
        draft.external = link;
    }
    if let Some(stars) = fields.stars {
        draft.stars = stars;
    }
    if let Some(price) = fields.price {
        draft.price = Some(price);
    }
    if let Some(currency) = fields.currency {
        draft.currency = currency;
    }
    for id in fields.wishlist {
        if !draft.in_wishlists.contains(&id) {
            draft.in_wishlists.push(id);
        }
    }
}

/// Save `draft`, then upload `cover` for the saved wish.
async fn save<T: Transport + 'static>(
    client: &Client<T>,
    mut draft: WishDraft,
    cover: Option<&Path>,
) -> Result<String> {
    let image = cover.map(read_image).transpose()?;
    if let Some((extension, _)) = &image {
        draft.image_extension = Some(extension.clone());
    }
    let wish = client.save_wish(draft).await?;
    if let Some((extension, bytes)) = image {
        client
            .images()
            .upload(ImageKind::Cover, &wish.id, &extension, bytes)
            .await?;
    }
    Ok(wish.id)
}

pub async fn new<T: Transport + 'static>(
    client: &Client<T>,
    title: String,
    fields: WishArgs,
    cover: Option<&Path>,
    out: &mut impl Write,
) -> Result<()> {
    let mut draft = WishDraft::new(title);
    apply_fields(&mut draft, fields);
    let id = save(client, draft, cover).await?;
    writeln!(out, "Created wish {}", id)?;
    Ok(())
}

pub async fn edit<T: Transport + 'static>(
    client: &Client<T>,
    id: &str,
    edit: WishEdit,
    cover: Option<&Path>,
    out: &mut impl Write,
) -> Result<()> {
    let wishes = client.user_wishes().await?;
    let wish = wishes
        .iter()
        .find(|w| w.id == id)
        .ok_or_else(|| Error::WishNotFound(id.to_string()))?;

    let mut draft = WishDraft::from_wish(wish);
    if let Some(title) = edit.title {
        draft.title = title;
    }
    if edit.clear_wishlists {
        draft.in_wishlists.clear();
    }
    apply_fields(&mut draft, edit.fields);

    let id = save(client, draft, cover).await?;
    writeln!(out, "Updated wish {}", id)?;
    Ok(())
}

pub async fn delete<T: Transport + 'static>(
    client: &Client<T>,
    id: &str,
    out: &mut impl Write,
) -> Result<()> {
    client.delete_wish(id).await?;
    writeln!(out, "Deleted wish {}", id)?;
    Ok(())
}

pub async fn complete<T: Transport + 'static>(
    client: &Client<T>,
    id: &str,
    out: &mut impl Write,
) -> Result<()> {
    client.complete_wish(id).await?;
    writeln!(out, "Completed wish {}", id)?;
    Ok(())
}

pub async fn uncomplete<T: Transport + 'static>(
    client: &Client<T>,
    id: &str,
    out: &mut impl Write,
) -> Result<()> {
    client.uncomplete_wish(id).await?;
    writeln!(out, "Reopened wish {}", id)?;
    Ok(())
}

pub async fn reserve<T: Transport + 'static>(
    client: &Client<T>,
    id: &str,
    out: &mut impl Write,
) -> Result<()> {
    client.reserve_wish(id).await?;
    writeln!(out, "Reserved wish {}", id)?;
    Ok(())
}

pub async fn unreserve<T: Transport + 'static>(
    client: &Client<T>,
    id: &str,
    out: &mut impl Write,
) -> Result<()> {
    client.unreserve_wish(id).await?;
    writeln!(out, "Released wish {}", id)?;
    Ok(())
}
