// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Wishlist and invitation mutations.

use tracing::info;
use wisssh_core::protocol::{paths, AcceptInvitationRequest};
use wisssh_core::relation::{self, sync_counterparts};
use wisssh_core::{MembershipDiff, Wishlist, WishlistDate, ID_LEN, INVITATION_CODE_LEN};

use super::{
    current_user_id, decode_entity, find_own_wishlist, patch_user, reconcile_wishlist, Mutations,
};
use crate::api::{ApiRequest, Transport};
use crate::cache::{Endpoint, QueryKey};
use crate::error::{Error, Result};

/// Editable fields of a wishlist. `id: None` creates a new wishlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishlistDraft {
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub date: Option<WishlistDate>,
    pub wishes: Vec<String>,
}

impl WishlistDraft {
    pub fn new(title: impl Into<String>) -> Self {
        WishlistDraft {
            id: None,
            title: title.into(),
            description: String::new(),
            date: None,
            wishes: Vec::new(),
        }
    }

    pub fn from_wishlist(wishlist: &Wishlist) -> Self {
        WishlistDraft {
            id: Some(wishlist.id.clone()),
            title: wishlist.title.clone(),
            description: wishlist.description.clone(),
            date: wishlist.date,
            wishes: wishlist.wishes.clone(),
        }
    }
}

impl<T: Transport + 'static> Mutations<T> {
    /// Create or edit a wishlist and mirror its wish membership.
    pub async fn save_wishlist(&self, draft: WishlistDraft) -> Result<Wishlist> {
        let existing = match &draft.id {
            Some(id) => Some(
                find_own_wishlist(&self.cache.lock(), id)
                    .ok_or_else(|| Error::WishlistNotFound(id.clone()))?,
            ),
            None => None,
        };
        let is_new = existing.is_none();

        let mut wishlist = match existing {
            Some(wishlist) => wishlist,
            None => {
                let id = self.api.unique_id(ID_LEN).await?;
                let invitation_code = self.api.unique_id(INVITATION_CODE_LEN).await?;
                let author = current_user_id(&self.cache.lock())?;
                Wishlist {
                    id,
                    author,
                    invitation_code,
                    title: String::new(),
                    description: String::new(),
                    date: None,
                    wishes: Vec::new(),
                }
            }
        };
        let diff = MembershipDiff::between(&wishlist.wishes, &draft.wishes);
        wishlist.title = draft.title;
        wishlist.description = draft.description;
        wishlist.date = draft.date;
        wishlist.wishes = draft.wishes;

        let request = ApiRequest::post(paths::WISHLIST_CREATE_OR_EDIT, &wishlist)?;
        let optimistic = wishlist.clone();
        let response = self
            .run("save_wishlist", request, move |cache, patches| {
                patches.record(cache.patch(&QueryKey::user_wishlists(), |data| {
                    let Some(wishlists) = data.wishlists_mut() else {
                        return false;
                    };
                    match wishlists.iter_mut().find(|w| w.id == optimistic.id) {
                        Some(existing) => *existing = optimistic.clone(),
                        None => wishlists.push(optimistic.clone()),
                    }
                    true
                }));
                if is_new {
                    patches.record(patch_user(cache, |user| {
                        relation::link(&mut user.wishlists, &optimistic.id)
                    }));
                }
                if !diff.is_empty() {
                    patches.record(cache.patch(&QueryKey::user_wishes(), |data| {
                        data.wishes_mut().is_some_and(|wishes| {
                            !sync_counterparts(&optimistic.id, &diff, wishes).is_empty()
                        })
                    }));
                }
                Ok(())
            })
            .await?;

        match decode_entity::<Wishlist>(&response) {
            Some(server) if server.id == wishlist.id => {
                reconcile_wishlist(&mut self.cache.lock(), &server);
                Ok(server)
            }
            _ => Ok(wishlist),
        }
    }

    /// Delete a wishlist and drop it from every wish's `in_wishlists`.
    pub async fn delete_wishlist(&self, id: &str) -> Result<()> {
        let request = ApiRequest::delete(format!("{}/{}", paths::WISHLIST_DELETE, id));
        self.run("delete_wishlist", request, |cache, patches| {
            patches.record(cache.patch(&QueryKey::user_wishlists(), |data| {
                data.wishlists_mut().is_some_and(|wishlists| {
                    let before = wishlists.len();
                    wishlists.retain(|w| w.id != id);
                    wishlists.len() != before
                })
            }));
            patches.record(patch_user(cache, |user| {
                relation::unlink(&mut user.wishlists, id)
            }));
            patches.record(cache.patch(&QueryKey::user_wishes(), |data| {
                data.wishes_mut().is_some_and(|wishes| {
                    wishes.iter_mut().fold(false, |changed, w| {
                        relation::unlink(&mut w.in_wishlists, id) | changed
                    })
                })
            }));
            Ok(())
        })
        .await?;
        Ok(())
    }

    /// Decline an invitation to someone else's wishlist.
    pub async fn delete_invitation(&self, id: &str) -> Result<()> {
        let request = ApiRequest::delete(format!("{}/{}", paths::DELETE_INVITATION, id));
        self.run("delete_invitation", request, |cache, patches| {
            patches.record(cache.patch(&QueryKey::invites(), |data| {
                data.wishlists_mut().is_some_and(|invites| {
                    let before = invites.len();
                    invites.retain(|w| w.id != id);
                    invites.len() != before
                })
            }));
            patches.record(patch_user(cache, |user| relation::unlink(&mut user.invites, id)));
            Ok(())
        })
        .await?;
        Ok(())
    }

    /// Join a wishlist through its invitation code.
    ///
    /// Nothing is known about the wishlist until the server answers, so this
    /// invalidates the affected queries instead of patching them.
    pub async fn accept_invitation(&self, code: &str) -> Result<()> {
        let request = ApiRequest::post(
            paths::ACCEPT_INVITATION,
            &AcceptInvitationRequest {
                invitation_code: code.to_string(),
            },
        )?;
        self.api.request(request).await?;

        let mut cache = self.cache.lock();
        cache.invalidate_endpoint(Endpoint::Invites);
        cache.invalidate_endpoint(Endpoint::Friends);
        cache.invalidate_endpoint(Endpoint::CurrentUser);
        info!("invitation accepted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "wishlists_tests.rs"]
mod tests;
