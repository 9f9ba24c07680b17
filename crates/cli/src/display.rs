// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use wisssh_core::{Currency, Stars, User, Wish, Wishlist};

/// Maximum line width for wrapped descriptions (excluding the 4-space indent).
const WRAP_WIDTH: usize = 96;

/// Wrap text at word boundaries if it's a single line.
///
/// Multi-line content is returned as-is to keep the author's formatting.
pub fn wrap_text(content: &str, width: usize) -> String {
    if content.contains('\n') || content.len() <= width {
        return content.to_string();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in content.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.join("\n")
}

/// `★★☆` style rendering, always `Stars::MAX` glyphs wide.
pub fn format_stars(stars: Stars) -> String {
    let filled = usize::from(stars.get());
    let empty = usize::from(Stars::MAX) - filled;
    format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
}

/// Whole prices drop the decimals: `100 €`, `99.50 $`.
pub fn format_price(price: f64, currency: Currency) -> String {
    if price.fract() == 0.0 {
        format!("{:.0} {}", price, currency.symbol())
    } else {
        format!("{:.2} {}", price, currency.symbol())
    }
}

/// One-line wish summary.
///
/// `viewer` is the logged-in user, used to tell their own reservations apart.
pub fn format_wish_line(wish: &Wish, viewer: Option<&str>) -> String {
    let mut line = format!("- [{}] {}  {}", wish.id, wish.title, format_stars(wish.stars));
    if let Some(price) = wish.price {
        line.push_str("  ");
        line.push_str(&format_price(price, wish.currency));
    }
    if wish.is_completed {
        line.push_str("  (done)");
    }
    match wish.reserved_by.as_deref() {
        Some(by) if Some(by) == viewer => line.push_str("  (reserved by you)"),
        Some(_) => line.push_str("  (reserved)"),
        None => {}
    }
    line
}

/// Wish summary followed by its link and wrapped description, indented.
pub fn format_wish(wish: &Wish, viewer: Option<&str>) -> Vec<String> {
    let mut lines = vec![format_wish_line(wish, viewer)];
    if !wish.external.is_empty() {
        lines.push(format!("    {}", wish.external));
    }
    if !wish.description.is_empty() {
        for line in wrap_text(&wish.description, WRAP_WIDTH).lines() {
            lines.push(format!("    {}", line));
        }
    }
    lines
}

pub fn format_wishlist_line(wishlist: &Wishlist) -> String {
    let mut line = format!("- [{}] {}", wishlist.id, wishlist.title);
    if let Some(date) = wishlist.date {
        line.push_str(&format!("  {}", date));
    }
    let count = wishlist.wishes.len();
    line.push_str(&format!(
        "  {} {}",
        count,
        if count == 1 { "wish" } else { "wishes" }
    ));
    line
}

/// Wishlist summary with the invitation code to share it.
pub fn format_wishlist(wishlist: &Wishlist) -> Vec<String> {
    let mut lines = vec![format_wishlist_line(wishlist)];
    lines.push(format!("    invite code: {}", wishlist.invitation_code));
    if !wishlist.description.is_empty() {
        for line in wrap_text(&wishlist.description, WRAP_WIDTH).lines() {
            lines.push(format!("    {}", line));
        }
    }
    lines
}

pub fn format_friend_line(user: &User) -> String {
    format!("- [{}] {}", user.id, user.name)
}

pub fn format_user(user: &User) -> Vec<String> {
    vec![
        format!("{} <{}>", user.name, user.email),
        format!("  id: {}", user.id),
        format!(
            "  wishes: {}, wishlists: {}, invites: {}",
            user.wishes.len(),
            user.wishlists.len(),
            user.invites.len()
        ),
    ]
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
