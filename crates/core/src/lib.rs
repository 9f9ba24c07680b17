// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! wisssh-core: Shared types for the Wisssh wishlist client
//!
//! This crate provides the entity types, id generation, wire payloads and the
//! wish/wishlist relation routine used by the `wisssh` client and CLI.

pub mod entity;
pub mod error;
pub mod id;
pub mod protocol;
pub mod relation;

pub use entity::{Currency, ImageKind, Stars, User, Wish, Wishlist, WishlistDate};
pub use error::{Error, Result};
pub use id::{generate_id, generate_unique_id, is_valid_id, ID_LEN, INVITATION_CODE_LEN};
pub use protocol::TokenPair;
pub use relation::{Linked, MembershipDiff};
