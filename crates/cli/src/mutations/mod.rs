// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Optimistic mutations with ordered undo.
//!
//! Every mutation follows the same sequence:
//!
//! 1. Under the cache lock, patch each affected entry and keep the undo
//!    [`Patch`] in a [`PatchSet`].
//! 2. Send the request.
//! 3. On failure, restore the patches newest first. Only what this
//!    mutation changed is undone; edits by mutations that overlapped it
//!    stay in place.
//! 4. On success, keep the patches and fold the server's copy of the
//!    entity (when the body carries one) into every entry holding it.
//!
//! Patches are applied before the first `.await` on the request, so a
//! reader sees them as soon as the mutation future has been polled once.

mod profile;
mod wishes;
mod wishlists;

pub use wishes::WishDraft;
pub use wishlists::WishlistDraft;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use wisssh_core::{User, Wish, Wishlist};

use crate::api::{ApiClient, ApiRequest, ApiResponse, Transport};
use crate::cache::{EntityCache, Endpoint, Patch, QueryData, QueryKey, SharedCache};
use crate::error::{Error, Result};

/// Undo records of one mutation, in the order they were applied.
#[derive(Debug, Default)]
pub struct PatchSet {
    patches: Vec<Patch>,
}

impl PatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the undo record of a patch that changed something.
    pub fn record(&mut self, patch: Option<Patch>) {
        if let Some(patch) = patch {
            self.patches.push(patch);
        }
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// Keys touched, in application order.
    pub fn keys(&self) -> Vec<QueryKey> {
        self.patches.iter().map(|p| p.key.clone()).collect()
    }

    /// Undo every patch, newest first.
    pub fn rollback(self, cache: &mut EntityCache) {
        for patch in self.patches.into_iter().rev() {
            cache.restore(patch);
        }
    }
}

/// The mutation engine.
pub struct Mutations<T: Transport + 'static> {
    api: Arc<ApiClient<T>>,
    cache: SharedCache,
}

impl<T: Transport + 'static> Mutations<T> {
    pub fn new(api: Arc<ApiClient<T>>, cache: SharedCache) -> Self {
        Mutations { api, cache }
    }

    /// Apply `optimistic`, send `request`, and roll back if either fails.
    async fn run<F>(&self, op: &'static str, request: ApiRequest, optimistic: F) -> Result<ApiResponse>
    where
        F: FnOnce(&mut EntityCache, &mut PatchSet) -> Result<()>,
    {
        let mut patches = PatchSet::new();
        {
            let mut cache = self.cache.lock();
            if let Err(e) = optimistic(&mut cache, &mut patches) {
                patches.rollback(&mut cache);
                return Err(e);
            }
        }
        debug!(op, patches = patches.len(), "optimistic patches applied");

        match self.api.request(request).await {
            Ok(response) => Ok(response),
            Err(e) => {
                warn!(op, error = %e, patches = patches.len(), "mutation failed, rolling back");
                patches.rollback(&mut self.cache.lock());
                Err(e)
            }
        }
    }
}

/// Decode a success body, if it holds an entity at all.
fn decode_entity<E: DeserializeOwned>(response: &ApiResponse) -> Option<E> {
    if response.body.is_empty() {
        return None;
    }
    response.json().ok()
}

/// Id of the logged-in user, from the cached `getCurrentUser` result.
fn current_user_id(cache: &EntityCache) -> Result<String> {
    cache
        .data(&QueryKey::current_user())
        .and_then(|data| data.as_user().map(|u| u.id.clone()))
        .ok_or_else(|| Error::NotCached {
            what: "current user".to_string(),
        })
}

/// Every cached wish list: the user's own and each friend's.
fn wish_list_keys(cache: &EntityCache) -> Vec<QueryKey> {
    let mut keys = vec![QueryKey::user_wishes()];
    keys.extend(cache.keys_for(Endpoint::FriendWishes));
    keys
}

/// Cached copy of one of the user's own wishes.
fn find_own_wish(cache: &EntityCache, id: &str) -> Option<Wish> {
    cache
        .data(&QueryKey::user_wishes())
        .and_then(|d| d.wish(id).cloned())
}

/// Cached copy of one of the user's own wishlists. Invitations are not editable.
fn find_own_wishlist(cache: &EntityCache, id: &str) -> Option<Wishlist> {
    cache
        .data(&QueryKey::user_wishlists())
        .and_then(|d| d.wishlist(id).cloned())
}

/// Edit the cached current user.
fn patch_user<F>(cache: &mut EntityCache, edit: F) -> Option<Patch>
where
    F: FnOnce(&mut User) -> bool,
{
    cache.patch(&QueryKey::current_user(), |data| {
        data.user_mut().map(edit).unwrap_or(false)
    })
}

/// Edit wish `id` in every wish list that holds it.
fn patch_wish_everywhere<F>(cache: &mut EntityCache, patches: &mut PatchSet, id: &str, edit: F)
where
    F: Fn(&mut Wish),
{
    for key in wish_list_keys(cache) {
        patches.record(cache.patch(&key, |data| {
            match data
                .wishes_mut()
                .and_then(|wishes| wishes.iter_mut().find(|w| w.id == id))
            {
                Some(wish) => {
                    edit(wish);
                    true
                }
                None => false,
            }
        }));
    }
}

/// Replace `id` with `replacement` wherever it is cached, if it differs.
fn replace_in<E, F>(list: &mut [E], replacement: &E, same: F) -> bool
where
    E: Clone + PartialEq,
    F: Fn(&E) -> bool,
{
    match list.iter_mut().find(|e| same(e)) {
        Some(existing) if existing != replacement => {
            *existing = replacement.clone();
            true
        }
        _ => false,
    }
}

/// Fold the server's copy of a wish into the cache.
fn reconcile_wish(cache: &mut EntityCache, wish: &Wish) {
    for key in wish_list_keys(cache) {
        if cache
            .patch(&key, |data| {
                data.wishes_mut()
                    .is_some_and(|list| replace_in(list, wish, |w| w.id == wish.id))
            })
            .is_some()
        {
            debug!(key = %key, wish = %wish.id, "reconciled server copy");
        }
    }
}

fn reconcile_wishlist(cache: &mut EntityCache, wishlist: &Wishlist) {
    for key in [QueryKey::user_wishlists(), QueryKey::invites()] {
        if cache
            .patch(&key, |data| {
                data.wishlists_mut()
                    .is_some_and(|list| replace_in(list, wishlist, |w| w.id == wishlist.id))
            })
            .is_some()
        {
            debug!(key = %key, wishlist = %wishlist.id, "reconciled server copy");
        }
    }
}

fn reconcile_user(cache: &mut EntityCache, user: &User) {
    let replaced = cache.patch(&QueryKey::current_user(), |data| match data {
        QueryData::User(current) if current.id == user.id && current != user => {
            *current = user.clone();
            true
        }
        _ => false,
    });
    if replaced.is_some() {
        debug!(user = %user.id, "reconciled server copy");
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
