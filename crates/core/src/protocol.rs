// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Request and response bodies exchanged with the Wisssh REST backend.
//!
//! Paths are relative to the configured API origin. Field names follow the
//! backend's camelCase JSON.

use serde::{Deserialize, Serialize};

/// REST paths used by the client.
pub mod paths {
    pub const LOGIN: &str = "auth/login";
    pub const SIGNUP: &str = "auth/signup";
    pub const REFRESH_TOKEN: &str = "auth/refresh-token";
    pub const USERNAME_BY_EMAIL: &str = "auth/get-username-by-email";
    pub const ALL_USERNAMES: &str = "auth/get-all-usernames";

    pub const CURRENT_USER: &str = "users/single/current";
    pub const FRIENDS: &str = "users/get-friends";
    pub const UPDATE_PROFILE: &str = "users/update-profile";

    pub const WISH_CREATE_OR_EDIT: &str = "wishes/create-or-edit";
    pub const WISH_DELETE: &str = "wishes/delete-wish";
    pub const WISH_COMPLETE: &str = "wishes/complete-wish";
    pub const WISH_UNCOMPLETE: &str = "wishes/uncomplete-wish";
    pub const WISH_RESERVE: &str = "wishes/reserve-wish";
    pub const WISH_UNRESERVE: &str = "wishes/unreserve-wish";
    pub const USER_WISHES: &str = "wishes/get-user-wishes";
    pub const FRIEND_WISHES: &str = "wishes/get-friend-wishes";

    pub const WISHLIST_CREATE_OR_EDIT: &str = "wishlists/create-or-edit";
    pub const WISHLIST_DELETE: &str = "wishlists/delete-wishlist";
    pub const ACCEPT_INVITATION: &str = "wishlists/accept-invitation";
    pub const DELETE_INVITATION: &str = "wishlists/delete-invitation";
    pub const USER_WISHLISTS: &str = "wishlists/get-user-wishlists";
    pub const INVITES: &str = "wishlists/get-invites";

    pub const IMAGES: &str = "images";
    pub const IMAGE_POST: &str = "images/post";
    pub const IMAGE_DELETE: &str = "images/delete";
    pub const COPY_WISH_COVER: &str = "images/copy-wish-cover";

    pub const ALL_IDS: &str = "ids/all";

    pub const PASSWORD_RESET_EMAIL: &str = "mail/send-password-reset-email";
    pub const VERIFY_PASSWORD_RESET: &str = "mail/verificate-password-reset";
}

/// Access and refresh token issued on login, signup and refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Body of the complete/uncomplete/reserve/unreserve endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishActionRequest {
    pub wish_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptInvitationRequest {
    pub invitation_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: String,
    pub image_extension: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyCoverRequest {
    pub source_id: String,
    pub target_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetRequest {
    pub email: String,
}

/// Response of `auth/get-username-by-email`; `name` is null for unknown emails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsernameLookup {
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
