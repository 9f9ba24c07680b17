// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Process-wide entity cache.
//!
//! Query results are stored by [`QueryKey`] as immutable `Arc<QueryData>`
//! snapshots. Writers never edit a snapshot in place: [`EntityCache::patch`]
//! swaps in a modified copy and hands back a [`Patch`] holding the snapshots
//! before and after. Undoing a patch reverts only the items and fields it
//! changed, so patches applied to the same entry since then survive.
//!
//! The cache is shared through [`SharedCache`]. Its lock is synchronous and
//! must never be held across an `.await`.

mod data;
mod key;

pub use data::QueryData;
pub use key::{Endpoint, QueryKey};

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tracing::debug;

use crate::error::Error;

/// Capacity of the change notification channel.
const EVENT_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueryStatus {
    #[default]
    Uninitialized,
    Pending,
    Fulfilled,
    Rejected,
}

/// State of one cached query.
#[derive(Debug, Clone, Default)]
pub struct QueryEntry {
    pub status: QueryStatus,
    pub data: Option<Arc<QueryData>>,
    /// Error of the last failed fetch. Cleared by the next success.
    pub error: Option<Arc<Error>>,
    pub fulfilled_at: Option<DateTime<Utc>>,
    /// Set by invalidation; the next query refetches.
    pub stale: bool,
}

impl QueryEntry {
    /// Fulfilled and not invalidated since.
    pub fn is_fresh(&self) -> bool {
        self.status == QueryStatus::Fulfilled && !self.stale
    }
}

/// Change notification sent to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEvent {
    Changed(QueryKey),
    Reset,
}

/// Undo record for one patch: the entry's snapshots before and after it.
#[derive(Debug, Clone)]
pub struct Patch {
    pub key: QueryKey,
    previous: Arc<QueryData>,
    applied: Arc<QueryData>,
}

/// Query results keyed by signature.
pub struct EntityCache {
    entries: BTreeMap<QueryKey, QueryEntry>,
    events: broadcast::Sender<CacheEvent>,
}

impl Default for EntityCache {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityCache {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        EntityCache {
            entries: BTreeMap::new(),
            events,
        }
    }

    pub fn entry(&self, key: &QueryKey) -> Option<&QueryEntry> {
        self.entries.get(key)
    }

    /// Current snapshot for `key`, if any data was ever fetched.
    pub fn data(&self, key: &QueryKey) -> Option<Arc<QueryData>> {
        self.entries.get(key).and_then(|e| e.data.clone())
    }

    pub fn is_fresh(&self, key: &QueryKey) -> bool {
        self.entries.get(key).is_some_and(QueryEntry::is_fresh)
    }

    /// Mark a fetch as started. Existing data stays readable.
    pub fn begin(&mut self, key: &QueryKey) {
        let entry = self.entries.entry(key.clone()).or_default();
        entry.status = QueryStatus::Pending;
        self.notify(key);
    }

    /// Store a fetched result.
    pub fn fulfill(&mut self, key: &QueryKey, data: Arc<QueryData>) {
        let entry = self.entries.entry(key.clone()).or_default();
        entry.status = QueryStatus::Fulfilled;
        entry.data = Some(data);
        entry.error = None;
        entry.fulfilled_at = Some(Utc::now());
        entry.stale = false;
        debug!(key = %key, "query fulfilled");
        self.notify(key);
    }

    /// Record a failed fetch, keeping the previous data.
    pub fn reject(&mut self, key: &QueryKey, error: Arc<Error>) {
        let entry = self.entries.entry(key.clone()).or_default();
        entry.status = QueryStatus::Rejected;
        entry.error = Some(error);
        debug!(key = %key, "query rejected");
        self.notify(key);
    }

    /// Apply `edit` to a copy of the entry's data.
    ///
    /// `edit` returns whether it changed anything. Returns the undo record
    /// when the entry was replaced, `None` when there was no data to patch
    /// or `edit` left it untouched.
    pub fn patch<F>(&mut self, key: &QueryKey, edit: F) -> Option<Patch>
    where
        F: FnOnce(&mut QueryData) -> bool,
    {
        let entry = self.entries.get_mut(key)?;
        let previous = entry.data.clone()?;
        let mut next = QueryData::clone(&previous);
        if !edit(&mut next) {
            return None;
        }
        let applied = Arc::new(next);
        entry.data = Some(Arc::clone(&applied));
        debug!(key = %key, "entry patched");
        self.notify(key);
        Some(Patch {
            key: key.clone(),
            previous,
            applied,
        })
    }

    /// Undo a patch.
    ///
    /// If the entry still holds the patched snapshot, the previous one is put
    /// back as is. Otherwise only what the patch changed is reverted, and
    /// later edits to other items or fields are kept.
    pub fn restore(&mut self, patch: Patch) {
        let Some(entry) = self.entries.get_mut(&patch.key) else {
            return;
        };
        let restored = match &entry.data {
            Some(current) if !Arc::ptr_eq(current, &patch.applied) => {
                debug!(key = %patch.key, "entry changed since patch, reverting its edits");
                Arc::new(current.revert(&patch.previous, &patch.applied))
            }
            _ => patch.previous,
        };
        entry.data = Some(restored);
        debug!(key = %patch.key, "entry restored");
        self.notify(&patch.key);
    }

    /// Mark an entry stale so the next query refetches it.
    pub fn invalidate(&mut self, key: &QueryKey) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.stale = true;
            self.notify(key);
        }
    }

    /// Invalidate every entry of an endpoint, whatever its argument.
    pub fn invalidate_endpoint(&mut self, endpoint: Endpoint) {
        for key in self.keys_for(endpoint) {
            self.invalidate(&key);
        }
    }

    /// Keys currently cached for `endpoint`.
    pub fn keys_for(&self, endpoint: Endpoint) -> Vec<QueryKey> {
        self.entries
            .keys()
            .filter(|k| k.endpoint == endpoint)
            .cloned()
            .collect()
    }

    /// Every cached key, in order.
    pub fn keys(&self) -> impl Iterator<Item = &QueryKey> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop everything, e.g. on logout.
    pub fn reset(&mut self) {
        self.entries.clear();
        debug!("cache reset");
        let _ = self.events.send(CacheEvent::Reset);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.events.subscribe()
    }

    fn notify(&self, key: &QueryKey) {
        // No subscribers is fine
        let _ = self.events.send(CacheEvent::Changed(key.clone()));
    }
}

/// The cache as injected into the query layer and mutation engine.
#[derive(Clone, Default)]
pub struct SharedCache {
    inner: Arc<Mutex<EntityCache>>,
}

impl SharedCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&self) -> MutexGuard<'_, EntityCache> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn data(&self, key: &QueryKey) -> Option<Arc<QueryData>> {
        self.lock().data(key)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.lock().subscribe()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
