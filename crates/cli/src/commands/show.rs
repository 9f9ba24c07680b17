// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;
use std::time::Duration;

use super::{load_images, print_lines};
use crate::api::Transport;
use crate::client::Client;
use crate::display::{format_friend_line, format_wish, format_wishlist, format_wishlist_line};
use crate::error::Result;

pub async fn friends<T: Transport + 'static>(client: &Client<T>, out: &mut impl Write) -> Result<()> {
    let friends = client.friends().await?;
    if friends.is_empty() {
        writeln!(out, "No friends yet")?;
    }
    for friend in &friends {
        writeln!(out, "{}", format_friend_line(friend))?;
    }
    Ok(())
}

/// List the user's wishes, or `friend`'s.
///
/// With `covers` set, cover images are downloaded first (pausing that long
/// between batches) and each loaded cover is listed under its wish.
pub async fn wishes<T: Transport + 'static>(
    client: &Client<T>,
    friend: Option<&str>,
    covers: Option<Duration>,
    out: &mut impl Write,
) -> Result<()> {
    let me = client.current_user().await?;
    let wishes = match friend {
        Some(id) => client.friend_wishes(id).await?,
        None => client.user_wishes().await?,
    };

    if let Some(period) = covers {
        let ids: Vec<&str> = wishes.iter().map(|w| w.id.as_str()).collect();
        client.images().promote(&ids);
        load_images(client, period).await;
    }

    if wishes.is_empty() {
        writeln!(out, "No wishes")?;
    }
    for wish in &wishes {
        print_lines(out, &format_wish(wish, Some(&me.id)))?;
        if covers.is_some() {
            if let Some(image) = client.images().image(&wish.id) {
                writeln!(
                    out,
                    "    cover: {} ({} bytes, {})",
                    image.url,
                    image.blob.bytes.len(),
                    image.blob.mime
                )?;
            }
        }
    }
    Ok(())
}

pub async fn wishlists<T: Transport + 'static>(
    client: &Client<T>,
    out: &mut impl Write,
) -> Result<()> {
    let wishlists = client.user_wishlists().await?;
    if wishlists.is_empty() {
        writeln!(out, "No wishlists")?;
    }
    for wishlist in &wishlists {
        print_lines(out, &format_wishlist(wishlist))?;
    }
    Ok(())
}

pub async fn invites<T: Transport + 'static>(client: &Client<T>, out: &mut impl Write) -> Result<()> {
    let invites = client.invites().await?;
    if invites.is_empty() {
        writeln!(out, "No invitations")?;
    }
    for wishlist in &invites {
        writeln!(out, "{}", format_wishlist_line(wishlist))?;
    }
    Ok(())
}

pub async fn usernames<T: Transport + 'static>(
    client: &Client<T>,
    out: &mut impl Write,
) -> Result<()> {
    for name in client.all_usernames().await? {
        writeln!(out, "{}", name)?;
    }
    Ok(())
}
