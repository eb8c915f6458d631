//! Search Module
//!
//! Search port, query value types, and the Elasticsearch backend.

mod elastic;
mod port;
pub mod query;

pub use elastic::ElasticSearch;
pub use port::{NestedFilter, Page, SearchPort, SortSpec};
