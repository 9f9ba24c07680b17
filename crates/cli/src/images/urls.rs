// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Object URL handles for fetched image blobs.
//!
//! A handle stays valid until revoked. The table revokes a handle whenever
//! its entry is overwritten or removed, so no handle outlives its image.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

/// Opaque handle to a loaded blob, e.g. `blob:wisssh/3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Image bytes and their media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlob {
    pub bytes: Arc<Vec<u8>>,
    pub mime: &'static str,
}

#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub url: ObjectUrl,
    pub blob: ImageBlob,
    /// When the blob was stored, compared against entity modification times.
    pub loaded_at: DateTime<Utc>,
}

/// Loaded images by owner id, plus the set of live handles.
#[derive(Debug, Default)]
pub struct ObjectUrlTable {
    next_handle: u64,
    images: HashMap<String, LoadedImage>,
    live: HashSet<ObjectUrl>,
}

impl ObjectUrlTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a blob for `id`, revoking the handle it replaces.
    pub fn insert(&mut self, id: &str, blob: ImageBlob) -> ObjectUrl {
        self.next_handle += 1;
        let url = ObjectUrl(format!("blob:wisssh/{}", self.next_handle));
        self.live.insert(url.clone());

        let loaded = LoadedImage {
            url: url.clone(),
            blob,
            loaded_at: Utc::now(),
        };
        if let Some(previous) = self.images.insert(id.to_string(), loaded) {
            self.revoke(&previous.url);
        }
        url
    }

    /// Drop the image of `id` and revoke its handle.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.images.remove(id) {
            Some(previous) => {
                self.revoke(&previous.url);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &str) -> Option<&LoadedImage> {
        self.images.get(id)
    }

    pub fn url(&self, id: &str) -> Option<&ObjectUrl> {
        self.images.get(id).map(|image| &image.url)
    }

    pub fn loaded_at(&self, id: &str) -> Option<DateTime<Utc>> {
        self.images.get(id).map(|image| image.loaded_at)
    }

    /// Returns true until `url` is revoked.
    pub fn is_live(&self, url: &ObjectUrl) -> bool {
        self.live.contains(url)
    }

    pub fn live_handles(&self) -> usize {
        self.live.len()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Revoke every handle.
    pub fn clear(&mut self) {
        self.images.clear();
        self.live.clear();
        debug!("all image handles revoked");
    }

    fn revoke(&mut self, url: &ObjectUrl) {
        if self.live.remove(url) {
            debug!(url = %url, "image handle revoked");
        }
    }
}

/// Media type for an image file extension.
pub fn mime_for(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
#[path = "urls_tests.rs"]
mod tests;
