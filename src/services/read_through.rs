//! Read-Through Module
//!
//! The single synchronization point between the cache and the search backend:
//! check the cache, on a miss load from search, populate the cache, return.

use std::future::Future;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, error};

use crate::cache::{CacheExt, CacheKey, CachePort};
use crate::error::{GatewayError, Result};
use crate::search::SearchPort;

// == Read Through ==
/// Cache-aside reads over a shared cache and search backend.
///
/// Holds no per-request state; clones share both backing stores.
#[derive(Clone)]
pub struct ReadThrough {
    cache: Arc<dyn CachePort>,
    search: Arc<dyn SearchPort>,
}

impl ReadThrough {
    pub fn new(cache: Arc<dyn CachePort>, search: Arc<dyn SearchPort>) -> Self {
        Self { cache, search }
    }

    pub fn search(&self) -> &dyn SearchPort {
        self.search.as_ref()
    }

    // == Single Object ==
    /// Reads one record by id.
    ///
    /// A cache hit returns without touching the backend. On a miss the
    /// document is looked up in `index`; if found it is cached under `key`
    /// for `ttl_seconds`. A document the backend does not have yields
    /// `Ok(None)` and writes nothing.
    pub async fn fetch_one<T>(
        &self,
        key: &CacheKey,
        index: &str,
        id: &str,
        ttl_seconds: u64,
    ) -> Result<Option<T>>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        if let Some(hit) = self.cache.get_one::<T>(key).await? {
            debug!(%key, "Cache hit");
            return Ok(Some(hit));
        }
        debug!(%key, index, "Cache miss, querying search backend");

        let Some(doc) = self.search.get_by_id(index, id).await? else {
            return Ok(None);
        };
        let record: T = decode_document(index, doc)?;

        self.cache.set_one(key, &record, ttl_seconds).await?;
        Ok(Some(record))
    }

    // == List ==
    /// Reads a record list.
    ///
    /// `load` runs only on a cache miss (futures are lazy). Every parameter
    /// that shapes the loaded result must be part of `key`.
    pub async fn fetch_list<T, F>(
        &self,
        key: &CacheKey,
        ttl_seconds: u64,
        load: F,
    ) -> Result<Option<Vec<T>>>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: Future<Output = Result<Option<Vec<T>>>> + Send,
    {
        if let Some(hit) = self.cache.get_list::<T>(key).await? {
            debug!(%key, count = hit.len(), "Cache hit");
            return Ok(Some(hit));
        }
        debug!(%key, "Cache miss, querying search backend");

        let records = match load.await? {
            Some(records) if !records.is_empty() => records,
            _ => return Ok(None),
        };

        self.cache.set_list(key, &records, ttl_seconds).await?;
        Ok(Some(records))
    }
}

/// Converts one backend document into a record.
pub fn decode_document<T: DeserializeOwned>(index: &str, doc: Value) -> Result<T> {
    serde_json::from_value(doc).map_err(|e| {
        error!(index, "Document does not match the expected shape: {}", e);
        GatewayError::Internal(format!("malformed document in '{index}': {e}"))
    })
}

/// Converts backend documents into records, preserving order.
pub fn decode_documents<T: DeserializeOwned>(index: &str, docs: Vec<Value>) -> Result<Vec<T>> {
    docs.into_iter()
        .map(|doc| decode_document(index, doc))
        .collect()
}
