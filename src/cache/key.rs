//! Cache Key Module
//!
//! Deterministic key construction from a namespace prefix and ordered arguments.

use std::fmt;

use tracing::error;

use crate::error::{GatewayError, Result};

// == Cache Key ==
/// A validated cache key of the form `{prefix}-{arg1}:{arg2}:...:{argN}:`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// == Build Key ==
/// Builds a cache key from a prefix and an ordered list of arguments.
///
/// Argument order is significant: the same values in a different order yield a
/// different key. No hashing is applied.
///
/// # Errors
/// `InvalidKeyArgs` when the prefix is empty or no arguments are given.
pub fn build_key<I>(prefix: &str, args: I) -> Result<CacheKey>
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    if prefix.is_empty() {
        error!("Cache key prefix is required");
        return Err(GatewayError::InvalidKeyArgs(
            "key prefix must not be empty".to_string(),
        ));
    }

    let mut key = format!("{prefix}-");
    let mut count = 0usize;
    for arg in args {
        key.push_str(&arg.to_string());
        key.push(':');
        count += 1;
    }

    if count == 0 {
        error!(prefix, "Cache key requires at least one argument");
        return Err(GatewayError::InvalidKeyArgs(format!(
            "key for prefix '{prefix}' needs at least one argument"
        )));
    }

    Ok(CacheKey(key))
}
