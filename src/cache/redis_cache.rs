//! Redis Cache Module
//!
//! Canonical cache backend on a shared Redis server.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{Client, RedisError};
use tracing::{error, info};

use crate::cache::{CacheKey, CachePort};
use crate::error::{GatewayError, Result};

// == Redis Cache ==
/// Cache backend over a Redis connection manager.
///
/// The manager multiplexes one connection and reconnects on failure; cloning
/// it is cheap, so each operation works on its own handle.
#[derive(Clone)]
pub struct RedisCache {
    manager: ConnectionManager,
}

impl RedisCache {
    /// Connects to the Redis server at `url`.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = Client::open(url).map_err(|e| command_failed("OPEN", url, e))?;
        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| command_failed("CONNECT", url, e))?;
        info!("Connected to Redis at {}", url);
        Ok(Self { manager })
    }
}

fn command_failed(command: &str, key: &str, err: RedisError) -> GatewayError {
    error!(command, key, "Redis command failed: {}", err);
    GatewayError::CacheUnavailable(format!("redis {command} failed: {err}"))
}

#[async_trait]
impl CachePort for RedisCache {
    fn backend_name(&self) -> &'static str {
        "redis"
    }

    async fn get(&self, key: &CacheKey) -> Result<Option<String>> {
        let mut conn = self.manager.clone();
        redis::cmd("GET")
            .arg(key.as_str())
            .query_async::<_, Option<String>>(&mut conn)
            .await
            .map_err(|e| command_failed("GET", key.as_str(), e))
    }

    async fn set(&self, key: &CacheKey, value: String, ttl_seconds: u64) -> Result<()> {
        let mut conn = self.manager.clone();
        redis::cmd("SET")
            .arg(key.as_str())
            .arg(value)
            .arg("EX")
            .arg(ttl_seconds)
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(|e| command_failed("SET", key.as_str(), e))
    }

    async fn read_list(&self, key: &CacheKey) -> Result<Vec<String>> {
        let mut conn = self.manager.clone();
        redis::cmd("LRANGE")
            .arg(key.as_str())
            .arg(0)
            .arg(-1)
            .query_async::<_, Vec<String>>(&mut conn)
            .await
            .map_err(|e| command_failed("LRANGE", key.as_str(), e))
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

        // Concurrent misses on one key must rewrite the list, not extend it
        let mut conn = self.manager.clone();
        let mut pipe = redis::pipe();
        pipe.atomic()
            .cmd("DEL")
            .arg(key.as_str())
            .ignore()
            .cmd("LPUSH")
            .arg(key.as_str())
            .arg(&values)
            .ignore()
            .cmd("EXPIRE")
            .arg(key.as_str())
            .arg(ttl_seconds)
            .ignore();

        pipe.query_async::<_, ()>(&mut conn)
            .await
            .map_err(|e| command_failed("LPUSH", key.as_str(), e))
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.manager.clone();
        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map(|_| ())
            .map_err(|e| command_failed("PING", "-", e))
    }
}
