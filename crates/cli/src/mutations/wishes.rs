// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Wish mutations.

use chrono::Utc;
use wisssh_core::protocol::{paths, WishActionRequest};
use wisssh_core::relation::{self, sync_counterparts};
use wisssh_core::{Currency, MembershipDiff, Stars, Wish, ID_LEN};

use super::{
    current_user_id, decode_entity, find_own_wish, patch_user, patch_wish_everywhere,
    reconcile_wish, Mutations,
};
use crate::api::{ApiRequest, Transport};
use crate::cache::{EntityCache, QueryKey};
use crate::error::{Error, Result};

/// Editable fields of a wish. `id: None` creates a new wish.
#[derive(Debug, Clone, PartialEq)]
pub struct WishDraft {
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub external: String,
    pub image_extension: Option<String>,
    pub image_ar: f64,
    pub stars: Stars,
    pub price: Option<f64>,
    pub currency: Currency,
    pub in_wishlists: Vec<String>,
}

impl WishDraft {
    pub fn new(title: impl Into<String>) -> Self {
        WishDraft {
            id: None,
            title: title.into(),
            description: String::new(),
            external: String::new(),
            image_extension: None,
            image_ar: 1.0,
            stars: Stars::default(),
            price: None,
            currency: Currency::default(),
            in_wishlists: Vec::new(),
        }
    }

    /// Draft prefilled from an existing wish, for editing.
    pub fn from_wish(wish: &Wish) -> Self {
        WishDraft {
            id: Some(wish.id.clone()),
            title: wish.title.clone(),
            description: wish.description.clone(),
            external: wish.external.clone(),
            image_extension: wish.image_extension.clone(),
            image_ar: wish.image_ar,
            stars: wish.stars,
            price: wish.price,
            currency: wish.currency,
            in_wishlists: wish.in_wishlists.clone(),
        }
    }

    fn apply_to(self, wish: &mut Wish) {
        wish.title = self.title;
        wish.description = self.description;
        wish.external = self.external;
        wish.image_extension = self.image_extension;
        wish.image_ar = self.image_ar;
        wish.stars = self.stars;
        wish.price = self.price;
        wish.currency = self.currency;
        wish.in_wishlists = self.in_wishlists;
        wish.last_modified_at = Utc::now();
    }
}

impl<T: Transport + 'static> Mutations<T> {
    /// Create or edit a wish and mirror its wishlist membership.
    ///
    /// Only wishlists added to or removed from `in_wishlists` are touched.
    pub async fn save_wish(&self, draft: WishDraft) -> Result<Wish> {
        let (id, is_new) = match &draft.id {
            Some(id) => (id.clone(), false),
            None => (self.api.unique_id(ID_LEN).await?, true),
        };

        let (wish, previous_links) = {
            let cache = self.cache.lock();
            let mut wish = if is_new {
                let now = Utc::now();
                Wish {
                    id: id.clone(),
                    author: current_user_id(&cache)?,
                    title: String::new(),
                    description: String::new(),
                    external: String::new(),
                    image_extension: None,
                    image_ar: 1.0,
                    stars: Stars::default(),
                    price: None,
                    currency: Currency::default(),
                    in_wishlists: Vec::new(),
                    reserved_by: None,
                    is_completed: false,
                    completed_at: None,
                    created_at: now,
                    last_modified_at: now,
                }
            } else {
                find_own_wish(&cache, &id).ok_or_else(|| Error::WishNotFound(id.clone()))?
            };
            let previous_links = wish.in_wishlists.clone();
            draft.apply_to(&mut wish);
            (wish, previous_links)
        };
        let diff = MembershipDiff::between(&previous_links, &wish.in_wishlists);

        let request = ApiRequest::post(paths::WISH_CREATE_OR_EDIT, &wish)?;
        let optimistic = wish.clone();
        let response = self
            .run("save_wish", request, move |cache, patches| {
                patches.record(cache.patch(&QueryKey::user_wishes(), |data| {
                    let Some(wishes) = data.wishes_mut() else {
                        return false;
                    };
                    match wishes.iter_mut().find(|w| w.id == optimistic.id) {
                        Some(existing) => *existing = optimistic.clone(),
                        None => wishes.push(optimistic.clone()),
                    }
                    true
                }));
                if is_new {
                    patches.record(patch_user(cache, |user| {
                        relation::link(&mut user.wishes, &optimistic.id)
                    }));
                }
                if !diff.is_empty() {
                    patches.record(cache.patch(&QueryKey::user_wishlists(), |data| {
                        data.wishlists_mut().is_some_and(|wishlists| {
                            !sync_counterparts(&optimistic.id, &diff, wishlists).is_empty()
                        })
                    }));
                }
                Ok(())
            })
            .await?;

        match decode_entity::<Wish>(&response) {
            Some(server) if server.id == wish.id => {
                reconcile_wish(&mut self.cache.lock(), &server);
                Ok(server)
            }
            _ => Ok(wish),
        }
    }

    /// Delete a wish and unlink it from the user and every wishlist.
    pub async fn delete_wish(&self, id: &str) -> Result<()> {
        let request = ApiRequest::delete(format!("{}/{}", paths::WISH_DELETE, id));
        self.run("delete_wish", request, |cache, patches| {
            patches.record(cache.patch(&QueryKey::user_wishes(), |data| {
                data.wishes_mut().is_some_and(|wishes| {
                    let before = wishes.len();
                    wishes.retain(|w| w.id != id);
                    wishes.len() != before
                })
            }));
            patches.record(patch_user(cache, |user| relation::unlink(&mut user.wishes, id)));
            patches.record(cache.patch(&QueryKey::user_wishlists(), |data| {
                data.wishlists_mut().is_some_and(|wishlists| {
                    wishlists
                        .iter_mut()
                        .fold(false, |changed, w| relation::unlink(&mut w.wishes, id) | changed)
                })
            }));
            Ok(())
        })
        .await?;
        Ok(())
    }

    /// Mark a wish as fulfilled.
    pub async fn complete_wish(&self, id: &str) -> Result<()> {
        let now = Utc::now();
        self.wish_action("complete_wish", paths::WISH_COMPLETE, id, |_, _| {
            Ok(move |wish: &mut Wish| {
                wish.is_completed = true;
                wish.completed_at = Some(now);
            })
        })
        .await
    }

    pub async fn uncomplete_wish(&self, id: &str) -> Result<()> {
        self.wish_action("uncomplete_wish", paths::WISH_UNCOMPLETE, id, |_, _| {
            Ok(|wish: &mut Wish| {
                wish.is_completed = false;
                wish.completed_at = None;
            })
        })
        .await
    }

    /// Reserve a wish for the current user.
    pub async fn reserve_wish(&self, id: &str) -> Result<()> {
        self.wish_action("reserve_wish", paths::WISH_RESERVE, id, |cache, _| {
            let me = current_user_id(cache)?;
            Ok(move |wish: &mut Wish| wish.reserved_by = Some(me.clone()))
        })
        .await
    }

    pub async fn unreserve_wish(&self, id: &str) -> Result<()> {
        self.wish_action("unreserve_wish", paths::WISH_UNRESERVE, id, |_, _| {
            Ok(|wish: &mut Wish| wish.reserved_by = None)
        })
        .await
    }

    /// POST `{wishId}` to `path`, editing every cached copy of the wish.
    ///
    /// `prepare` runs under the cache lock and returns the edit to apply.
    async fn wish_action<P, E>(
        &self,
        op: &'static str,
        path: &str,
        id: &str,
        prepare: P,
    ) -> Result<()>
    where
        P: FnOnce(&EntityCache, &str) -> Result<E>,
        E: Fn(&mut Wish),
    {
        let request = ApiRequest::post(
            path,
            &WishActionRequest {
                wish_id: id.to_string(),
            },
        )?;
        let response = self
            .run(op, request, |cache, patches| {
                let edit = prepare(cache, id)?;
                patch_wish_everywhere(cache, patches, id, edit);
                Ok(())
            })
            .await?;

        if let Some(server) = decode_entity::<Wish>(&response).filter(|w| w.id == id) {
            reconcile_wish(&mut self.cache.lock(), &server);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "wishes_tests.rs"]
mod tests;
