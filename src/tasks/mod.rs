//! Background Tasks Module
//!
//! # Tasks
//! - TTL Cleanup: purges expired entries from the in-process cache

mod cleanup;

pub use cleanup::spawn_cleanup_task;
