// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Query signatures: which endpoint, with which argument.

use std::fmt;

use wisssh_core::protocol::paths;

/// A read endpoint whose result is cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Endpoint {
    CurrentUser,
    Friends,
    UserWishes,
    FriendWishes,
    UserWishlists,
    Invites,
    AllUsernames,
}

impl Endpoint {
    /// Name of the query, as used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::CurrentUser => "getCurrentUser",
            Endpoint::Friends => "getFriends",
            Endpoint::UserWishes => "getUserWishes",
            Endpoint::FriendWishes => "getFriendWishes",
            Endpoint::UserWishlists => "getUserWishlists",
            Endpoint::Invites => "getInvites",
            Endpoint::AllUsernames => "getAllUsernames",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::CurrentUser => paths::CURRENT_USER,
            Endpoint::Friends => paths::FRIENDS,
            Endpoint::UserWishes => paths::USER_WISHES,
            Endpoint::FriendWishes => paths::FRIEND_WISHES,
            Endpoint::UserWishlists => paths::USER_WISHLISTS,
            Endpoint::Invites => paths::INVITES,
            Endpoint::AllUsernames => paths::ALL_USERNAMES,
        }
    }
}

/// Cache key: an endpoint plus its optional argument.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryKey {
    pub endpoint: Endpoint,
    pub arg: Option<String>,
}

impl QueryKey {
    pub fn new(endpoint: Endpoint) -> Self {
        QueryKey {
            endpoint,
            arg: None,
        }
    }

    pub fn current_user() -> Self {
        Self::new(Endpoint::CurrentUser)
    }

    pub fn friends() -> Self {
        Self::new(Endpoint::Friends)
    }

    pub fn user_wishes() -> Self {
        Self::new(Endpoint::UserWishes)
    }

    pub fn friend_wishes(user_id: &str) -> Self {
        QueryKey {
            endpoint: Endpoint::FriendWishes,
            arg: Some(user_id.to_string()),
        }
    }

    pub fn user_wishlists() -> Self {
        Self::new(Endpoint::UserWishlists)
    }

    pub fn invites() -> Self {
        Self::new(Endpoint::Invites)
    }

    pub fn all_usernames() -> Self {
        Self::new(Endpoint::AllUsernames)
    }

    /// Request path, with the argument passed as `userId`.
    pub fn path(&self) -> String {
        match &self.arg {
            Some(arg) => format!("{}?userId={}", self.endpoint.path(), arg),
            None => self.endpoint.path().to_string(),
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.arg {
            Some(arg) => write!(f, "{}({})", self.endpoint.name(), arg),
            None => write!(f, "{}", self.endpoint.name()),
        }
    }
}
