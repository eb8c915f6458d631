//! Cache Port Module
//!
//! Capability traits over a key/value store holding serialized records with
//! per-key expiry.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tracing::error;

use crate::cache::CacheKey;
use crate::error::{GatewayError, Result};

// == Cache Port ==
/// Raw string operations every cache backend provides.
///
/// Failures must surface as `CacheUnavailable`; a missing key is `Ok(None)`
/// (or an empty list), never an error.
#[async_trait]
pub trait CachePort: Send + Sync {
    /// Backend name for logging.
    fn backend_name(&self) -> &'static str;

    /// Returns the blob stored at `key`, if any.
    async fn get(&self, key: &CacheKey) -> Result<Option<String>>;

    /// Stores a blob with expiry, overwriting any prior value.
    async fn set(&self, key: &CacheKey, value: String, ttl_seconds: u64) -> Result<()>;

    /// Returns the list stored at `key` in stored (head-first) order.
    async fn read_list(&self, key: &CacheKey) -> Result<Vec<String>>;

    /// Replaces the list at `key` by prepending each value in turn, then applies
    /// one TTL to the whole list. The stored order is therefore the reverse of
    /// `values`.
    async fn replace_list(&self, key: &CacheKey, values: Vec<String>, ttl_seconds: u64)
        -> Result<()>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<()>;
}

// == Typed Extension ==
/// Typed record operations layered over any [`CachePort`].
#[async_trait]
pub trait CacheExt: CachePort {
    /// Deserializes the record stored at `key`.
    async fn get_one<T>(&self, key: &CacheKey) -> Result<Option<T>>
    where
        T: DeserializeOwned + Send,
    {
        match self.get(key).await? {
            Some(raw) => decode(key, &raw).map(Some),
            None => Ok(None),
        }
    }

    /// Serializes and stores one record with expiry.
    async fn set_one<T>(&self, key: &CacheKey, value: &T, ttl_seconds: u64) -> Result<()>
    where
        T: Serialize + Sync,
    {
        let raw = encode(key, value)?;
        self.set(key, raw, ttl_seconds).await
    }

    /// Reads a record list in the order it was written. Absent when the list is
    /// empty or missing.
    async fn get_list<T>(&self, key: &CacheKey) -> Result<Option<Vec<T>>>
    where
        T: DeserializeOwned + Send,
    {
        let stored = self.read_list(key).await?;
        if stored.is_empty() {
            return Ok(None);
        }

        // Lists are written head-first, so the stored order is reversed
        stored
            .iter()
            .rev()
            .map(|raw| decode(key, raw))
            .collect::<Result<Vec<T>>>()
            .map(Some)
    }

    /// Stores a record list under one TTL. An empty slice writes nothing.
    async fn set_list<T>(&self, key: &CacheKey, values: &[T], ttl_seconds: u64) -> Result<()>
    where
        T: Serialize + Sync,
    {
        if values.is_empty() {
            return Ok(());
        }

        let raw = values
            .iter()
            .map(|value| encode(key, value))
            .collect::<Result<Vec<String>>>()?;
        self.replace_list(key, raw, ttl_seconds).await
    }
}

impl<C: CachePort + ?Sized> CacheExt for C {}

fn decode<T: DeserializeOwned>(key: &CacheKey, raw: &str) -> Result<T> {
    serde_json::from_str(raw).map_err(|e| {
        error!(%key, "Cached record does not match the expected shape: {}", e);
        GatewayError::Internal(format!("corrupt cache record at '{key}': {e}"))
    })
}

fn encode<T: Serialize>(key: &CacheKey, value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| {
        error!(%key, "Failed to serialize record for cache: {}", e);
        GatewayError::Internal(format!("cannot serialize record for '{key}': {e}"))
    })
}
