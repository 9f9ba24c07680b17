// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The many-to-many relation between wishes and wishlists.
//!
//! `Wish::in_wishlists` and `Wishlist::wishes` are two copies of the same edge
//! set. Both edit paths (editing a wish, editing a wishlist) go through
//! [`MembershipDiff`] and [`sync_counterparts`] so the two sides cannot drift.

use std::collections::HashSet;

use crate::entity::{Wish, Wishlist};

/// One side of the wish/wishlist relation.
pub trait Linked {
    /// Id of this entity.
    fn key(&self) -> &str;

    /// Ids of the entities on the other side of the relation.
    fn links(&self) -> &[String];

    fn links_mut(&mut self) -> &mut Vec<String>;
}

impl Linked for Wish {
    fn key(&self) -> &str {
        &self.id
    }

    fn links(&self) -> &[String] {
        &self.in_wishlists
    }

    fn links_mut(&mut self) -> &mut Vec<String> {
        &mut self.in_wishlists
    }
}

impl Linked for Wishlist {
    fn key(&self) -> &str {
        &self.id
    }

    fn links(&self) -> &[String] {
        &self.wishes
    }

    fn links_mut(&mut self) -> &mut Vec<String> {
        &mut self.wishes
    }
}

/// Edges added and removed by a membership edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipDiff {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl MembershipDiff {
    /// Computes `new \ old` (in `new` order) and `old \ new` (in `old` order).
    pub fn between(old: &[String], new: &[String]) -> Self {
        let old_set: HashSet<&str> = old.iter().map(String::as_str).collect();
        let new_set: HashSet<&str> = new.iter().map(String::as_str).collect();

        let mut seen = HashSet::new();
        let added = new
            .iter()
            .filter(|id| !old_set.contains(id.as_str()) && seen.insert(id.as_str()))
            .cloned()
            .collect();

        let mut seen = HashSet::new();
        let removed = old
            .iter()
            .filter(|id| !new_set.contains(id.as_str()) && seen.insert(id.as_str()))
            .cloned()
            .collect();

        MembershipDiff { added, removed }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Append `id` to `list` unless already present.
pub fn link(list: &mut Vec<String>, id: &str) -> bool {
    if list.iter().any(|existing| existing == id) {
        return false;
    }
    list.push(id.to_string());
    true
}

/// Remove every occurrence of `id` from `list`.
pub fn unlink(list: &mut Vec<String>, id: &str) -> bool {
    let before = list.len();
    list.retain(|existing| existing != id);
    list.len() != before
}

/// Mirror a membership change of `owner_id` onto its counterparts.
///
/// Only counterparts named in `diff` are modified; every other entity keeps
/// its link list untouched, so unrelated concurrent edits survive. Returns
/// the keys of the counterparts that actually changed.
pub fn sync_counterparts<T: Linked>(
    owner_id: &str,
    diff: &MembershipDiff,
    counterparts: &mut [T],
) -> Vec<String> {
    let mut changed = Vec::new();
    for counterpart in counterparts.iter_mut() {
        let key = counterpart.key().to_string();
        let mut touched = false;
        if diff.added.iter().any(|id| *id == key) {
            touched |= link(counterpart.links_mut(), owner_id);
        }
        if diff.removed.iter().any(|id| *id == key) {
            touched |= unlink(counterpart.links_mut(), owner_id);
        }
        if touched {
            changed.push(key);
        }
    }
    changed
}

#[cfg(test)]
#[path = "relation_tests.rs"]
mod tests;
