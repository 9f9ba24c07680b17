// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use crate::test_helpers::{user, wish, wishlist, ME};
use wisssh_core::WishlistDate;
use yare::parameterized;

#[parameterized(
    none = { 0, "☆☆☆" },
    two = { 2, "★★☆" },
    max = { 3, "★★★" },
)]
fn stars(value: u8, expected: &str) {
    assert_eq!(format_stars(Stars::new(value).unwrap()), expected);
}

#[parameterized(
    whole = { 100.0, Currency::Euro, "100 €" },
    cents = { 99.5, Currency::Dollar, "99.50 $" },
    roubles = { 1500.0, Currency::Rouble, "1500 ₽" },
)]
fn price(value: f64, currency: Currency, expected: &str) {
    assert_eq!(format_price(value, currency), expected);
}

#[test]
fn wish_line_shows_price_and_stars() {
    let w = wish("AbC123", ME);
    assert_eq!(format_wish_line(&w, Some(ME)), "- [AbC123] Wish AbC123  ☆☆☆  10 ₽");
}

#[test]
fn wish_line_without_price() {
    let mut w = wish("AbC123", ME);
    w.price = None;
    assert_eq!(format_wish_line(&w, None), "- [AbC123] Wish AbC123  ☆☆☆");
}

#[test]
fn wish_line_flags_completion_and_reservation() {
    let mut w = wish("Frw001", "fr0001");
    w.is_completed = true;
    w.reserved_by = Some(ME.into());
    let line = format_wish_line(&w, Some(ME));
    assert!(line.ends_with("(done)  (reserved by you)"), "{line}");

    w.reserved_by = Some("other1".into());
    assert!(format_wish_line(&w, Some(ME)).ends_with("(reserved)"));
}

#[test]
fn wish_details_indent_link_and_description() {
    let mut w = wish("AbC123", ME);
    w.external = "https://shop.example/bike".into();
    w.description = "red one".into();
    let lines = format_wish(&w, None);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "    https://shop.example/bike");
    assert_eq!(lines[2], "    red one");
}

#[test]
fn wishlist_line_counts_wishes() {
    let mut l = wishlist("Lst002", ME);
    l.wishes = vec!["Def456".into()];
    assert_eq!(format_wishlist_line(&l), "- [Lst002] Wishlist Lst002  1 wish");

    l.wishes.push("AbC123".into());
    l.date = Some(WishlistDate::new(1, 2, 2027).unwrap());
    assert_eq!(
        format_wishlist_line(&l),
        "- [Lst002] Wishlist Lst002  01.02.2027  2 wishes"
    );
}

#[test]
fn wishlist_details_show_invite_code() {
    let l = wishlist("Lst002", ME);
    let lines = format_wishlist(&l);
    assert_eq!(lines[1], "    invite code: abcdefghijk");
}

#[test]
fn user_summary() {
    let mut u = user(ME, "alice");
    u.wishes = vec!["AbC123".into()];
    let lines = format_user(&u);
    assert_eq!(lines[0], "alice <alice@example.com>");
    assert_eq!(lines[1], "  id: me0001");
    assert_eq!(lines[2], "  wishes: 1, wishlists: 0, invites: 0");
    assert_eq!(format_friend_line(&u), "- [me0001] alice");
}

#[test]
fn wrap_keeps_short_and_multiline_text() {
    assert_eq!(wrap_text("short", 10), "short");
    assert_eq!(wrap_text("a\nb c d e f g", 3), "a\nb c d e f g");
}

#[test]
fn wrap_breaks_at_word_boundaries() {
    assert_eq!(wrap_text("one two three four", 9), "one two\nthree\nfour");
}
