// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The client facade: one object owning every component.
//!
//! ```text
//!            ┌──────────── Client ────────────┐
//!            │                                │
//!   QueryLayer ──┐    Mutations ──┐    ImagePipeline
//!            │   ▼               ▼            │
//!            │ SharedCache ◄──────            │
//!            ▼                                ▼
//!         ApiClient ──► Transport      ApiClient
//!            │
//!         TokenStore
//! ```
//!
//! Typed getters feed every entity they return to the image pipeline, so
//! avatars and covers start loading as soon as their owners are seen.

use std::sync::Arc;

use wisssh_core::protocol::ProfileUpdate;
use wisssh_core::{User, Wish, Wishlist};

use crate::api::{ApiClient, Transport};
use crate::cache::{QueryData, QueryKey, SharedCache};
use crate::error::{Error, Result};
use crate::images::{ImagePipeline, DEFAULT_BATCH_SIZE};
use crate::mutations::{Mutations, WishDraft, WishlistDraft};
use crate::queries::QueryLayer;
use crate::session::TokenStore;

pub struct Client<T: Transport + 'static> {
    api: Arc<ApiClient<T>>,
    cache: SharedCache,
    queries: QueryLayer<T>,
    mutations: Mutations<T>,
    images: Arc<ImagePipeline<T>>,
}

impl<T: Transport + 'static> Client<T> {
    pub fn new(transport: T, session: Arc<TokenStore>) -> Self {
        Self::with_batch_size(transport, session, DEFAULT_BATCH_SIZE)
    }

    pub fn with_batch_size(transport: T, session: Arc<TokenStore>, batch_size: usize) -> Self {
        let api = Arc::new(ApiClient::new(transport, session));
        let cache = SharedCache::new();
        Client {
            queries: QueryLayer::new(Arc::clone(&api), cache.clone()),
            mutations: Mutations::new(Arc::clone(&api), cache.clone()),
            images: Arc::new(ImagePipeline::new(Arc::clone(&api), batch_size)),
            api,
            cache,
        }
    }

    pub fn session(&self) -> &Arc<TokenStore> {
        self.api.session()
    }

    pub fn api(&self) -> &Arc<ApiClient<T>> {
        &self.api
    }

    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    pub fn queries(&self) -> &QueryLayer<T> {
        &self.queries
    }

    pub fn mutations(&self) -> &Mutations<T> {
        &self.mutations
    }

    pub fn images(&self) -> &Arc<ImagePipeline<T>> {
        &self.images
    }

    fn require_login(&self) -> Result<()> {
        if self.session().is_authenticated() {
            Ok(())
        } else {
            Err(Error::NotLoggedIn)
        }
    }

    async fn fetch<R, F>(&self, key: QueryKey, extract: F) -> Result<R>
    where
        F: FnOnce(&QueryData) -> Option<R>,
    {
        self.require_login()?;
        let data = self.queries.query(&key).await?;
        extract(&data).ok_or_else(|| Error::NotCached {
            what: key.to_string(),
        })
    }

    pub async fn current_user(&self) -> Result<User> {
        let user = self
            .fetch(QueryKey::current_user(), |d| d.as_user().cloned())
            .await?;
        self.images.observe_user(&user);
        Ok(user)
    }

    pub async fn friends(&self) -> Result<Vec<User>> {
        let friends = self
            .fetch(QueryKey::friends(), |d| d.as_users().map(<[User]>::to_vec))
            .await?;
        for friend in &friends {
            self.images.observe_user(friend);
        }
        Ok(friends)
    }

    pub async fn user_wishes(&self) -> Result<Vec<Wish>> {
        let wishes = self
            .fetch(QueryKey::user_wishes(), |d| d.as_wishes().map(<[Wish]>::to_vec))
            .await?;
        self.observe_wishes(&wishes);
        Ok(wishes)
    }

    pub async fn friend_wishes(&self, user_id: &str) -> Result<Vec<Wish>> {
        let wishes = self
            .fetch(QueryKey::friend_wishes(user_id), |d| {
                d.as_wishes().map(<[Wish]>::to_vec)
            })
            .await?;
        self.observe_wishes(&wishes);
        Ok(wishes)
    }

    pub async fn user_wishlists(&self) -> Result<Vec<Wishlist>> {
        self.fetch(QueryKey::user_wishlists(), |d| {
            d.as_wishlists().map(<[Wishlist]>::to_vec)
        })
        .await
    }

    /// Wishlists the user was invited to.
    pub async fn invites(&self) -> Result<Vec<Wishlist>> {
        self.fetch(QueryKey::invites(), |d| d.as_wishlists().map(<[Wishlist]>::to_vec))
            .await
    }

    pub async fn all_usernames(&self) -> Result<Vec<String>> {
        self.fetch(QueryKey::all_usernames(), |d| {
            d.as_usernames().map(<[String]>::to_vec)
        })
        .await
    }

    fn observe_wishes(&self, wishes: &[Wish]) {
        for wish in wishes {
            self.images.observe_wish(wish);
        }
    }

    /// Create or edit a wish.
    pub async fn save_wish(&self, draft: WishDraft) -> Result<Wish> {
        self.current_user().await?;
        self.user_wishes().await?;
        self.user_wishlists().await?;
        let wish = self.mutations.save_wish(draft).await?;
        self.images.observe_wish(&wish);
        Ok(wish)
    }

    pub async fn delete_wish(&self, id: &str) -> Result<()> {
        self.require_login()?;
        self.mutations.delete_wish(id).await?;
        self.images.forget(id);
        Ok(())
    }

    pub async fn complete_wish(&self, id: &str) -> Result<()> {
        self.require_login()?;
        self.mutations.complete_wish(id).await
    }

    pub async fn uncomplete_wish(&self, id: &str) -> Result<()> {
        self.require_login()?;
        self.mutations.uncomplete_wish(id).await
    }

    pub async fn reserve_wish(&self, id: &str) -> Result<()> {
        self.current_user().await?;
        self.mutations.reserve_wish(id).await
    }

    pub async fn unreserve_wish(&self, id: &str) -> Result<()> {
        self.require_login()?;
        self.mutations.unreserve_wish(id).await
    }

    /// Create or edit a wishlist.
    pub async fn save_wishlist(&self, draft: WishlistDraft) -> Result<Wishlist> {
        self.current_user().await?;
        self.user_wishes().await?;
        self.user_wishlists().await?;
        self.mutations.save_wishlist(draft).await
    }

    pub async fn delete_wishlist(&self, id: &str) -> Result<()> {
        self.require_login()?;
        self.mutations.delete_wishlist(id).await
    }

    pub async fn accept_invitation(&self, code: &str) -> Result<()> {
        self.require_login()?;
        self.mutations.accept_invitation(code).await
    }

    pub async fn decline_invitation(&self, id: &str) -> Result<()> {
        self.require_login()?;
        self.mutations.delete_invitation(id).await
    }

    /// Update the profile and reload the avatar.
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<User> {
        self.current_user().await?;
        let user = self.mutations.update_profile(update).await?;
        self.images.forget(&user.id);
        self.images.observe_user(&user);
        Ok(user)
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
