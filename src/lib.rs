//! Movies Gateway - read-only film, genre, and person API
//!
//! Serves records from a search index through a read-through cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod services;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::GatewayError;
pub use tasks::spawn_cleanup_task;
