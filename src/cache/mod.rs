//! Cache Module
//!
//! Cache port, key building, and the Redis and in-memory backends.

mod entry;
mod key;
mod port;
mod redis_cache;
mod store;


// Re-export public types
pub use entry::{CacheEntry, Record};
pub use key::{build_key, CacheKey};
pub use port::{CacheExt, CachePort};
pub use redis_cache::RedisCache;
pub use store::MemoryCache;
