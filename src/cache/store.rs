//! Memory Cache Module
//!
//! In-process cache backend with the same list and TTL semantics as Redis.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::error;

use crate::cache::{CacheEntry, CacheKey, CachePort, Record};
use crate::error::{GatewayError, Result};

// == Memory Cache ==
/// In-memory cache storage with TTL support.
///
/// Clones share the same underlying map. Expired entries read as absent and
/// are physically removed by [`MemoryCache::cleanup_expired`].
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl MemoryCache {
    // == Constructor ==
    /// Creates an empty MemoryCache.
    pub fn new() -> Self {
        Self::default()
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub async fn cleanup_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());
        before - entries.len()
    }

    // == Length ==
    /// Returns the current number of entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    // == TTL ==
    /// Returns the remaining TTL in seconds of a live entry.
    #[cfg(test)]
    pub async fn ttl_remaining(&self, key: &CacheKey) -> Option<u64> {
        let entries = self.entries.read().await;
        entries
            .get(key.as_str())
            .filter(|entry| !entry.is_expired())
            .and_then(CacheEntry::ttl_remaining)
    }
}

fn wrong_type(command: &str, key: &CacheKey) -> GatewayError {
    error!(command, %key, "Operation against a key holding the wrong kind of value");
    GatewayError::CacheUnavailable(format!(
        "{command} against '{key}' holding the wrong kind of value"
    ))
}

#[async_trait]
impl CachePort for MemoryCache {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &CacheKey) -> Result<Option<String>> {
        let entries = self.entries.read().await;
        match entries.get(key.as_str()) {
            Some(entry) if entry.is_expired() => Ok(None),
            Some(CacheEntry {
                record: Record::Blob(value),
                ..
            }) => Ok(Some(value.clone())),
            Some(_) => Err(wrong_type("GET", key)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &CacheKey, value: String, ttl_seconds: u64) -> Result<()> {
        let entry = CacheEntry::new(Record::Blob(value), Some(ttl_seconds));
        self.entries
            .write()
            .await
            .insert(key.as_str().to_string(), entry);
        Ok(())
    }

    async fn read_list(&self, key: &CacheKey) -> Result<Vec<String>> {
        let entries = self.entries.read().await;
        match entries.get(key.as_str()) {
            Some(entry) if entry.is_expired() => Ok(Vec::new()),
            Some(CacheEntry {
                record: Record::List(values),
                ..
            }) => Ok(values.clone()),
            Some(_) => Err(wrong_type("LRANGE", key)),
            None => Ok(Vec::new()),
        }
    }

    async fn replace_list(
        &self,
        key: &CacheKey,
        values: Vec<String>,
        ttl_seconds: u64,
    ) -> Result<()> {
        if values.is_empty() {
            return Ok(());
        }

        // Prepend each value, matching LPUSH
        let mut list = Vec::with_capacity(values.len());
        for value in values {
            list.insert(0, value);
        }

        let entry = CacheEntry::new(Record::List(list), Some(ttl_seconds));
        self.entries
            .write()
            .await
            .insert(key.as_str().to_string(), entry);
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
