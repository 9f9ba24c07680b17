// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pending image fetches, in two priority tiers.

use std::collections::VecDeque;

use wisssh_core::protocol::paths;
use wisssh_core::ImageKind;

/// One image waiting to be fetched. `id` is the owning user or wish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueItem {
    pub id: String,
    pub extension: String,
    pub kind: ImageKind,
}

impl QueueItem {
    pub fn new(id: impl Into<String>, extension: impl Into<String>, kind: ImageKind) -> Self {
        QueueItem {
            id: id.into(),
            extension: extension.into(),
            kind,
        }
    }

    pub fn filename(&self) -> String {
        format!("{}.{}", self.id, self.extension)
    }

    /// Request path of the image on its drive.
    pub fn path(&self) -> String {
        format!("{}/{}/{}", paths::IMAGES, self.kind.drive(), self.filename())
    }
}

/// `prior` is drained before `queue`. An id appears at most once overall.
#[derive(Debug, Default)]
pub struct ImageQueue {
    queue: VecDeque<QueueItem>,
    prior: VecDeque<QueueItem>,
}

impl ImageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the normal tier. Returns false if the id is already pending.
    pub fn enqueue(&mut self, item: QueueItem) -> bool {
        if self.contains(&item.id) {
            return false;
        }
        self.queue.push_back(item);
        true
    }

    /// Move the matching items to the prior tier, keeping their order.
    ///
    /// Items already prior stay where they are. Returns how many moved.
    pub fn promote<S: AsRef<str>>(&mut self, ids: &[S]) -> usize {
        let wanted = |item: &QueueItem| ids.iter().any(|id| id.as_ref() == item.id);
        let (moved, kept): (VecDeque<_>, VecDeque<_>) =
            self.queue.drain(..).partition(|item| wanted(item));
        self.queue = kept;
        let count = moved.len();
        self.prior.extend(moved);
        count
    }

    /// Take up to `n` items, prior tier first.
    pub fn take_batch(&mut self, n: usize) -> Vec<QueueItem> {
        let mut batch = Vec::with_capacity(n.min(self.len()));
        while batch.len() < n {
            match self.prior.pop_front().or_else(|| self.queue.pop_front()) {
                Some(item) => batch.push(item),
                None => break,
            }
        }
        batch
    }

    /// Drop a pending item from either tier.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.len();
        self.queue.retain(|item| item.id != id);
        self.prior.retain(|item| item.id != id);
        self.len() != before
    }

    pub fn contains(&self, id: &str) -> bool {
        self.is_queued(id) || self.is_prior(id)
    }

    pub fn is_queued(&self, id: &str) -> bool {
        self.queue.iter().any(|item| item.id == id)
    }

    pub fn is_prior(&self, id: &str) -> bool {
        self.prior.iter().any(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.queue.len() + self.prior.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty() && self.prior.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
        self.prior.clear();
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
