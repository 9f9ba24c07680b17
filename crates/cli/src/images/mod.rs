// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Image fetching with prioritised batches.
//!
//! Entities seen by the client enqueue their avatar or cover. A tick takes
//! up to `batch_size` items (promoted ones first) and fetches them
//! concurrently; ticks overlapping a running batch do nothing. Each fetched
//! blob gets an [`ObjectUrl`] handle that is revoked when superseded.
//!
//! Per image id:
//!
//! ```text
//! Unqueued ──► Queued ──► Prior ──► Loading ──► Loaded
//!                 └──────────────────►│
//!                                      └──(failure)──► Unqueued
//! ```

mod queue;
mod urls;

pub use queue::{ImageQueue, QueueItem};
pub use urls::{mime_for, ImageBlob, LoadedImage, ObjectUrl, ObjectUrlTable};

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use wisssh_core::protocol::{paths, CopyCoverRequest};
use wisssh_core::{ImageKind, User, Wish};

use crate::api::{ApiClient, ApiRequest, FilePart, Transport};
use crate::error::Result;

/// Images fetched per tick unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 8;

/// Multipart field carrying an uploaded image.
const UPLOAD_FIELD: &str = "image";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageState {
    Unqueued,
    Queued,
    Prior,
    Loading,
    Loaded,
}

#[derive(Default)]
struct PipelineState {
    queue: ImageQueue,
    loading: HashSet<String>,
    urls: ObjectUrlTable,
}

/// Clears the busy flag when a batch ends, even if the tick is dropped.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// The image queue, the handle table and the batch fetcher.
pub struct ImagePipeline<T: Transport + 'static> {
    api: Arc<ApiClient<T>>,
    state: Mutex<PipelineState>,
    busy: AtomicBool,
    batch_size: usize,
}

impl<T: Transport + 'static> ImagePipeline<T> {
    pub fn new(api: Arc<ApiClient<T>>, batch_size: usize) -> Self {
        ImagePipeline {
            api,
            state: Mutex::new(PipelineState::default()),
            busy: AtomicBool::new(false),
            batch_size: batch_size.max(1),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Enqueue the cover of `wish` if missing, or refetch it if stale.
    pub fn observe_wish(&self, wish: &Wish) -> bool {
        match &wish.image_extension {
            Some(ext) => self.observe(
                QueueItem::new(&wish.id, ext, ImageKind::Cover),
                Some(wish.last_modified_at),
            ),
            None => {
                self.forget(&wish.id);
                false
            }
        }
    }

    /// Enqueue the avatar of `user` if missing.
    pub fn observe_user(&self, user: &User) -> bool {
        match &user.image_extension {
            Some(ext) => self.observe(QueueItem::new(&user.id, ext, ImageKind::Avatar), None),
            None => {
                self.forget(&user.id);
                false
            }
        }
    }

    /// Returns true if the item was newly queued.
    fn observe(&self, item: QueueItem, modified_at: Option<DateTime<Utc>>) -> bool {
        let mut state = self.lock();
        if let Some(loaded_at) = state.urls.loaded_at(&item.id) {
            match modified_at {
                Some(modified) if modified > loaded_at => {
                    debug!(id = %item.id, "image stale, refetching");
                    state.urls.remove(&item.id);
                }
                _ => return false,
            }
        }
        if state.loading.contains(&item.id) {
            return false;
        }
        let queued = state.queue.enqueue(item);
        if queued {
            debug!(pending = state.queue.len(), "image queued");
        }
        queued
    }

    /// Fetch these ids before anything else still queued.
    pub fn promote<S: AsRef<str>>(&self, ids: &[S]) -> usize {
        self.lock().queue.promote(ids)
    }

    pub fn state(&self, id: &str) -> ImageState {
        let state = self.lock();
        if state.loading.contains(id) {
            ImageState::Loading
        } else if state.urls.get(id).is_some() {
            ImageState::Loaded
        } else if state.queue.is_prior(id) {
            ImageState::Prior
        } else if state.queue.is_queued(id) {
            ImageState::Queued
        } else {
            ImageState::Unqueued
        }
    }

    pub fn url(&self, id: &str) -> Option<ObjectUrl> {
        self.lock().urls.url(id).cloned()
    }

    pub fn image(&self, id: &str) -> Option<LoadedImage> {
        self.lock().urls.get(id).cloned()
    }

    /// Returns true until `url` is revoked.
    pub fn is_live(&self, url: &ObjectUrl) -> bool {
        self.lock().urls.is_live(url)
    }

    pub fn live_handles(&self) -> usize {
        self.lock().urls.live_handles()
    }

    pub fn pending(&self) -> usize {
        self.lock().queue.len()
    }

    /// Revoke the image of `id` and drop it from the queue.
    pub fn forget(&self, id: &str) {
        let mut state = self.lock();
        state.queue.remove(id);
        state.loading.remove(id);
        state.urls.remove(id);
    }

    /// Release every handle and drop everything pending.
    pub fn reset(&self) {
        let mut state = self.lock();
        state.queue.clear();
        state.loading.clear();
        state.urls.clear();
    }

    /// Fetch one batch. Does nothing while another batch is loading.
    ///
    /// Returns the number of images loaded.
    pub async fn tick(&self) -> usize {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("image batch in flight, skipping tick");
            return 0;
        }
        let _busy = BusyGuard(&self.busy);

        let batch = {
            let mut state = self.lock();
            let batch = state.queue.take_batch(self.batch_size);
            for item in &batch {
                state.loading.insert(item.id.clone());
            }
            batch
        };
        if batch.is_empty() {
            return 0;
        }
        debug!(size = batch.len(), "fetching image batch");

        let results = join_all(batch.iter().map(|item| self.fetch(item))).await;

        let mut loaded = 0;
        let mut state = self.lock();
        for (item, result) in batch.iter().zip(results) {
            // Forgotten or reset while loading
            if !state.loading.remove(&item.id) {
                continue;
            }
            match result {
                Ok(blob) => {
                    state.urls.insert(&item.id, blob);
                    loaded += 1;
                }
                Err(e) => warn!(id = %item.id, kind = %item.kind, error = %e, "image fetch failed"),
            }
        }
        loaded
    }

    async fn fetch(&self, item: &QueueItem) -> Result<ImageBlob> {
        let response = self.api.request(ApiRequest::get(item.path())).await?;
        Ok(ImageBlob {
            bytes: Arc::new(response.body),
            mime: mime_for(&item.extension),
        })
    }

    /// Upload a new image for `id` and queue it for display.
    pub async fn upload(
        &self,
        kind: ImageKind,
        id: &str,
        extension: &str,
        bytes: Vec<u8>,
    ) -> Result<()> {
        let part = FilePart {
            field: UPLOAD_FIELD.to_string(),
            file_name: format!("{}.{}", id, extension),
            mime: mime_for(extension).to_string(),
            bytes,
        };
        let path = format!("{}/{}/{}", paths::IMAGE_POST, kind.drive(), id);
        self.api.request(ApiRequest::multipart(path, part)).await?;

        self.replace(QueueItem::new(id, extension, kind));
        info!(id, kind = %kind, "image uploaded");
        Ok(())
    }

    pub async fn delete(&self, kind: ImageKind, id: &str) -> Result<()> {
        let path = format!("{}/{}/{}", paths::IMAGE_DELETE, kind.drive(), id);
        self.api.request(ApiRequest::delete(path)).await?;
        self.forget(id);
        info!(id, kind = %kind, "image deleted");
        Ok(())
    }

    /// Give wish `target_id` a copy of the cover of `source_id`.
    pub async fn copy_wish_cover(
        &self,
        source_id: &str,
        target_id: &str,
        extension: &str,
    ) -> Result<()> {
        let body = CopyCoverRequest {
            source_id: source_id.to_string(),
            target_id: target_id.to_string(),
        };
        self.api.post(paths::COPY_WISH_COVER, &body).await?;
        self.replace(QueueItem::new(target_id, extension, ImageKind::Cover));
        Ok(())
    }

    /// Drop whatever is known about `item.id` and queue it afresh, first.
    fn replace(&self, item: QueueItem) {
        let mut state = self.lock();
        let id = item.id.clone();
        state.queue.remove(&id);
        state.loading.remove(&id);
        state.urls.remove(&id);
        state.queue.enqueue(item);
        state.queue.promote(&[id]);
    }

    /// Run [`tick`](Self::tick) every `period` until the handle is aborted.
    pub fn spawn_poller(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let pipeline = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                pipeline.tick().await;
            }
        })
    }

    fn lock(&self) -> MutexGuard<'_, PipelineState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
