//! Search Port Module
//!
//! Capability trait over a document search backend and the query value types
//! it accepts.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

// == Page ==
/// One page of results. Both fields are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number
    pub number: u32,
    /// Documents per page
    pub size: u32,
}

impl Page {
    /// Creates a page, clamping both values to at least 1.
    pub fn new(number: u32, size: u32) -> Self {
        Self {
            number: number.max(1),
            size: size.max(1),
        }
    }

    /// Offset of the first document on this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.number - 1) * u64::from(self.size)
    }
}

// == Sort Spec ==
/// A sort directive: field name plus direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub descending: bool,
}

impl SortSpec {
    /// Parses `-field` (descending) or `field` (ascending).
    ///
    /// Returns `None` for an empty field name.
    pub fn parse(raw: &str) -> Option<Self> {
        let (field, descending) = match raw.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (raw, false),
        };
        if field.is_empty() {
            return None;
        }
        Some(Self {
            field: field.to_string(),
            descending,
        })
    }

    /// Backend direction keyword.
    pub fn direction(&self) -> &'static str {
        if self.descending {
            "desc"
        } else {
            "asc"
        }
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            write!(f, "-{}", self.field)
        } else {
            f.write_str(&self.field)
        }
    }
}

// == Nested Filter ==
/// Restricts results to documents whose nested collection `path` holds an
/// element with `field == value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedFilter {
    pub path: String,
    pub field: String,
    pub value: String,
}

impl NestedFilter {
    pub fn new(path: impl Into<String>, field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            field: field.into(),
            value: value.into(),
        }
    }
}

// == Search Port ==
/// Document search backend.
///
/// "Nothing there" is `Ok(None)`; an unreachable backend is
/// `BackendUnavailable`.
#[async_trait]
pub trait SearchPort: Send + Sync {
    /// Backend name for logging.
    fn backend_name(&self) -> &'static str;

    /// Point lookup of one document's source.
    async fn get_by_id(&self, index: &str, id: &str) -> Result<Option<Value>>;

    /// Paginated listing with an optional nested filter and sort.
    async fn list_all(
        &self,
        index: &str,
        page: Page,
        filter: Option<&NestedFilter>,
        sort: Option<&SortSpec>,
    ) -> Result<Option<Vec<Value>>>;

    /// Fuzzy full-text search on `field`. A blank or missing query lists
    /// documents unfiltered.
    async fn search_by_query(
        &self,
        index: &str,
        page: Page,
        field: &str,
        query: Option<&str>,
    ) -> Result<Option<Vec<Value>>>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> Result<()>;
}
