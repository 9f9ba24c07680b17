// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Cached query results.

use serde::de::DeserializeOwned;
use wisssh_core::relation::{link, unlink};
use wisssh_core::{MembershipDiff, User, Wish, Wishlist};

use super::key::Endpoint;
use crate::error::Result;

/// The decoded body of a query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryData {
    User(User),
    Users(Vec<User>),
    Wishes(Vec<Wish>),
    Wishlists(Vec<Wishlist>),
    Usernames(Vec<String>),
}

impl QueryData {
    /// Decode a response body into the shape `endpoint` returns.
    pub fn decode(endpoint: Endpoint, body: &[u8]) -> Result<Self> {
        fn parse<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
            Ok(serde_json::from_slice(body)?)
        }

        Ok(match endpoint {
            Endpoint::CurrentUser => QueryData::User(parse(body)?),
            Endpoint::Friends => QueryData::Users(parse(body)?),
            Endpoint::UserWishes | Endpoint::FriendWishes => QueryData::Wishes(parse(body)?),
            Endpoint::UserWishlists | Endpoint::Invites => QueryData::Wishlists(parse(body)?),
            Endpoint::AllUsernames => QueryData::Usernames(parse(body)?),
        })
    }

    pub fn as_user(&self) -> Option<&User> {
        match self {
            QueryData::User(user) => Some(user),
            _ => None,
        }
    }

    pub fn as_users(&self) -> Option<&[User]> {
        match self {
            QueryData::Users(users) => Some(users),
            _ => None,
        }
    }

    pub fn as_wishes(&self) -> Option<&[Wish]> {
        match self {
            QueryData::Wishes(wishes) => Some(wishes),
            _ => None,
        }
    }

    pub fn as_wishlists(&self) -> Option<&[Wishlist]> {
        match self {
            QueryData::Wishlists(wishlists) => Some(wishlists),
            _ => None,
        }
    }

    pub fn as_usernames(&self) -> Option<&[String]> {
        match self {
            QueryData::Usernames(names) => Some(names),
            _ => None,
        }
    }

    pub fn user_mut(&mut self) -> Option<&mut User> {
        match self {
            QueryData::User(user) => Some(user),
            _ => None,
        }
    }

    pub fn wishes_mut(&mut self) -> Option<&mut Vec<Wish>> {
        match self {
            QueryData::Wishes(wishes) => Some(wishes),
            _ => None,
        }
    }

    pub fn wishlists_mut(&mut self) -> Option<&mut Vec<Wishlist>> {
        match self {
            QueryData::Wishlists(wishlists) => Some(wishlists),
            _ => None,
        }
    }

    /// Look up a wish by id in a wish list.
    pub fn wish(&self, id: &str) -> Option<&Wish> {
        self.as_wishes()?.iter().find(|w| w.id == id)
    }

    /// Look up a wishlist by id in a wishlist list.
    pub fn wishlist(&self, id: &str) -> Option<&Wishlist> {
        self.as_wishlists()?.iter().find(|w| w.id == id)
    }

    /// Undo the change from `previous` to `applied` on top of `self`.
    ///
    /// Items the change added are dropped and items it removed come back.
    /// Within an item, a field is reverted only if it still holds the
    /// applied value, so edits made after `applied` are kept.
    pub fn revert(&self, previous: &QueryData, applied: &QueryData) -> QueryData {
        match (self, previous, applied) {
            (QueryData::User(current), QueryData::User(before), QueryData::User(after))
                if current.id == after.id =>
            {
                let mut user = current.clone();
                user.revert(before, after);
                QueryData::User(user)
            }
            (QueryData::Users(current), QueryData::Users(before), QueryData::Users(after)) => {
                QueryData::Users(revert_items(current, before, after))
            }
            (QueryData::Wishes(current), QueryData::Wishes(before), QueryData::Wishes(after)) => {
                QueryData::Wishes(revert_items(current, before, after))
            }
            (
                QueryData::Wishlists(current),
                QueryData::Wishlists(before),
                QueryData::Wishlists(after),
            ) => QueryData::Wishlists(revert_items(current, before, after)),
            (
                QueryData::Usernames(current),
                QueryData::Usernames(before),
                QueryData::Usernames(after),
            ) => QueryData::Usernames(revert_items(current, before, after)),
            _ => self.clone(),
        }
    }
}

/// An item of a cached list that can undo a change to itself.
trait Revert: Clone {
    fn item_id(&self) -> &str;

    /// Put back the fields `applied` changed, unless they changed again.
    fn revert(&mut self, previous: &Self, applied: &Self);
}

macro_rules! impl_revert {
    ($entity:ty, fields: [$($field:ident),*], links: [$($links:ident),*]) => {
        impl Revert for $entity {
            fn item_id(&self) -> &str {
                &self.id
            }

            fn revert(&mut self, previous: &Self, applied: &Self) {
                $(
                    if self.$field == applied.$field {
                        self.$field = Clone::clone(&previous.$field);
                    }
                )*
                $(
                    revert_links(&mut self.$links, &previous.$links, &applied.$links);
                )*
            }
        }
    };
}

impl_revert!(User, fields: [name, email, image_extension], links: [wishes, wishlists, invites]);

impl_revert!(
    Wish,
    fields: [
        author, title, description, external, image_extension, image_ar, stars, price, currency,
        reserved_by, is_completed, completed_at, created_at, last_modified_at
    ],
    links: [in_wishlists]
);

impl_revert!(
    Wishlist,
    fields: [author, invitation_code, title, description, date],
    links: [wishes]
);

impl Revert for String {
    fn item_id(&self) -> &str {
        self
    }

    fn revert(&mut self, previous: &Self, applied: &Self) {
        if self == applied {
            self.clone_from(previous);
        }
    }
}

/// Undo edge edits on a link list, keeping edges added or removed since.
fn revert_links(current: &mut Vec<String>, previous: &[String], applied: &[String]) {
    if current.as_slice() == applied {
        *current = previous.to_vec();
        return;
    }
    let undo = MembershipDiff::between(applied, previous);
    for id in &undo.removed {
        unlink(current, id);
    }
    for id in &undo.added {
        link(current, id);
    }
}

fn find<'a, E: Revert>(items: &'a [E], id: &str) -> Option<&'a E> {
    items.iter().find(|item| item.item_id() == id)
}

/// Per-item undo of a list change.
fn revert_items<E: Revert>(current: &[E], previous: &[E], applied: &[E]) -> Vec<E> {
    let mut items = Vec::with_capacity(current.len());
    for item in current {
        let id = item.item_id();
        match (find(previous, id), find(applied, id)) {
            // Added by the change
            (None, Some(_)) => {}
            (Some(before), Some(after)) => {
                let mut item = item.clone();
                item.revert(before, after);
                items.push(item);
            }
            _ => items.push(item.clone()),
        }
    }
    for (index, before) in previous.iter().enumerate() {
        let id = before.item_id();
        let removed = find(applied, id).is_none() && find(current, id).is_none();
        if removed {
            items.insert(index.min(items.len()), before.clone());
        }
    }
    items
}
