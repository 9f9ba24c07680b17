// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use wisssh_core::protocol::{paths, ProfileUpdate};
use wisssh_core::User;

use super::{decode_entity, patch_user, reconcile_user, Mutations};
use crate::api::{ApiRequest, Transport};
use crate::cache::QueryKey;
use crate::error::{Error, Result};

impl<T: Transport + 'static> Mutations<T> {
    /// Change the current user's name and avatar extension.
    ///
    /// Returns the updated user. Requires `getCurrentUser` to be cached.
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<User> {
        let request = ApiRequest::post(paths::UPDATE_PROFILE, &update)?;
        let response = self
            .run("update_profile", request, |cache, patches| {
                let patch = patch_user(cache, |user| {
                    user.name = update.name.clone();
                    user.image_extension = update.image_extension.clone();
                    true
                });
                if patch.is_none() {
                    return Err(Error::NotCached {
                        what: "current user".to_string(),
                    });
                }
                patches.record(patch);
                Ok(())
            })
            .await?;

        let mut cache = self.cache.lock();
        if let Some(server) = decode_entity::<User>(&response) {
            reconcile_user(&mut cache, &server);
        }
        cache
            .data(&QueryKey::current_user())
            .and_then(|data| data.as_user().cloned())
            .ok_or_else(|| Error::NotCached {
                what: "current user".to_string(),
            })
    }
}

#[cfg(test)]
#[path = "profile_tests.rs"]
mod tests;
