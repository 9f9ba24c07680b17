// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Read-through queries with in-flight de-duplication.
//!
//! At most one fetch per [`QueryKey`] is in flight. Callers arriving while
//! it runs join it and receive the same `Arc<QueryData>`. Fetches run on
//! their own task, so a caller giving up does not cancel them: the result
//! still lands in the cache.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use futures_util::future::{BoxFuture, FutureExt, Shared};
use tracing::{debug, warn};

use crate::api::{ApiClient, ApiRequest, Transport};
use crate::cache::{QueryData, QueryKey, SharedCache};
use crate::error::{Error, Result};

type FetchResult = std::result::Result<Arc<QueryData>, Arc<Error>>;
type SharedFetch = Shared<BoxFuture<'static, FetchResult>>;

/// Query entry point over the entity cache.
pub struct QueryLayer<T: Transport + 'static> {
    api: Arc<ApiClient<T>>,
    cache: SharedCache,
    in_flight: Arc<Mutex<HashMap<QueryKey, SharedFetch>>>,
}

impl<T: Transport + 'static> QueryLayer<T> {
    pub fn new(api: Arc<ApiClient<T>>, cache: SharedCache) -> Self {
        QueryLayer {
            api,
            cache,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    /// Cached data if fresh, otherwise the result of the (shared) fetch.
    pub async fn query(&self, key: &QueryKey) -> Result<Arc<QueryData>> {
        {
            let cache = self.cache.lock();
            if cache.is_fresh(key) {
                if let Some(data) = cache.data(key) {
                    debug!(key = %key, "cache hit");
                    return Ok(data);
                }
            }
        }
        self.refetch(key).await
    }

    /// Fetch regardless of freshness, joining a fetch already in flight.
    pub async fn refetch(&self, key: &QueryKey) -> Result<Arc<QueryData>> {
        self.fetch(key).await.map_err(Error::Shared)
    }

    /// Number of fetches currently running.
    pub fn in_flight(&self) -> usize {
        lock(&self.in_flight).len()
    }

    fn fetch(&self, key: &QueryKey) -> SharedFetch {
        let mut in_flight = lock(&self.in_flight);
        if let Some(existing) = in_flight.get(key) {
            debug!(key = %key, "joining in-flight fetch");
            return existing.clone();
        }

        self.cache.lock().begin(key);
        debug!(key = %key, "fetching");

        let api = Arc::clone(&self.api);
        let cache = self.cache.clone();
        let registry = Arc::clone(&self.in_flight);
        let owned_key = key.clone();
        let fetch = async move {
            let key = owned_key;
            let result = match api.request(ApiRequest::get(key.path())).await {
                Ok(response) => QueryData::decode(key.endpoint, &response.body).map(Arc::new),
                Err(e) => Err(e),
            }
            .map_err(Arc::new);

            {
                let mut cache = cache.lock();
                match &result {
                    Ok(data) => cache.fulfill(&key, Arc::clone(data)),
                    Err(e) => {
                        warn!(key = %key, error = %e, "query failed");
                        cache.reject(&key, Arc::clone(e));
                    }
                }
            }
            lock(&registry).remove(&key);
            result
        }
        .boxed()
        .shared();

        in_flight.insert(key.clone(), fetch.clone());
        // Runs to completion even if every caller drops its future
        tokio::spawn(fetch.clone());
        fetch
    }
}

fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
#[path = "queries_tests.rs"]
mod tests;
