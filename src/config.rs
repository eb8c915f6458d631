//! Configuration Module
//!
//! Handles loading and managing gateway configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Which cache store backs the read-through layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    /// Shared Redis server
    Redis,
    /// In-process store, for local runs
    Memory,
}

impl FromStr for CacheBackend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            _ => Err(format!("Unknown cache backend: {value}")),
        }
    }
}

/// Gateway configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Cache store selection
    pub cache_backend: CacheBackend,
    /// Redis connection URL
    pub redis_url: String,
    /// Elasticsearch base URL
    pub elastic_url: String,
    /// Index holding film documents
    pub films_index: String,
    /// Index holding genre documents
    pub genres_index: String,
    /// Index holding person documents
    pub persons_index: String,
    /// TTL in seconds for cached films
    pub films_cache_ttl: u64,
    /// TTL in seconds for cached genres
    pub genres_cache_ttl: u64,
    /// TTL in seconds for cached persons
    pub persons_cache_ttl: u64,
    /// Memory cache purge interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    /// - `CACHE_BACKEND` - `redis` or `memory` (default: redis)
    /// - `REDIS_URL` - Redis URL (default: redis://127.0.0.1:6379)
    /// - `ELASTIC_URL` - Elasticsearch URL (default: http://127.0.0.1:9200)
    /// - `FILMS_INDEX`, `GENRES_INDEX`, `PERSONS_INDEX` - index names
    /// - `FILMS_CACHE_TTL`, `GENRES_CACHE_TTL`, `PERSONS_CACHE_TTL` - TTLs in seconds,
    ///   between 1 and one year (default: 300)
    /// - `CLEANUP_INTERVAL` - memory cache purge frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parsed_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cache_backend: parsed_var("CACHE_BACKEND").unwrap_or(defaults.cache_backend),
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            elastic_url: env::var("ELASTIC_URL").unwrap_or(defaults.elastic_url),
            films_index: env::var("FILMS_INDEX").unwrap_or(defaults.films_index),
            genres_index: env::var("GENRES_INDEX").unwrap_or(defaults.genres_index),
            persons_index: env::var("PERSONS_INDEX").unwrap_or(defaults.persons_index),
            films_cache_ttl: ttl_var("FILMS_CACHE_TTL").unwrap_or(defaults.films_cache_ttl),
            genres_cache_ttl: ttl_var("GENRES_CACHE_TTL").unwrap_or(defaults.genres_cache_ttl),
            persons_cache_ttl: ttl_var("PERSONS_CACHE_TTL").unwrap_or(defaults.persons_cache_ttl),
            cleanup_interval: parsed_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
        }
    }
}

fn parsed_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

/// Longest accepted cache TTL in seconds (one year)
pub const MAX_CACHE_TTL: u64 = 365 * 24 * 60 * 60;

/// A cache TTL must be within `1..=MAX_CACHE_TTL`; Redis rejects `EX 0`.
fn ttl_var(name: &str) -> Option<u64> {
    parsed_var(name).filter(|ttl| (1..=MAX_CACHE_TTL).contains(ttl))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8000,
            cache_backend: CacheBackend::Redis,
            redis_url: "redis://127.0.0.1:6379".to_string(),
            elastic_url: "http://127.0.0.1:9200".to_string(),
            films_index: "movies".to_string(),
            genres_index: "genres".to_string(),
            persons_index: "persons".to_string(),
            films_cache_ttl: 300,
            genres_cache_ttl: 300,
            persons_cache_ttl: 300,
            cleanup_interval: 1,
        }
    }
}
