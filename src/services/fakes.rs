//! Test doubles for the cache and search ports.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::cache::{CacheKey, CachePort};
use crate::error::{GatewayError, Result};
use crate::search::{NestedFilter, Page, SearchPort, SortSpec};

pub fn sample_film(uuid: &str, title: &str, rating: f64) -> Value {
    json!({ "uuid": uuid, "title": title, "imdb_rating": rating })
}

// == Fake Search ==
/// In-memory search backend that counts every call.
#[derive(Default)]
pub struct FakeSearch {
    docs: HashMap<String, Vec<Value>>,
    calls: AtomicUsize,
    failing: bool,
}

impl FakeSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_doc(mut self, index: &str, doc: Value) -> Self {
        self.docs.entry(index.to_string()).or_default().push(doc);
        self
    }

    /// Every call fails as if the backend were down.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn enter(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(GatewayError::BackendUnavailable("connection refused".to_string()));
        }
        Ok(())
    }

    fn index(&self, index: &str) -> Vec<Value> {
        self.docs.get(index).cloned().unwrap_or_default()
    }
}

fn paginate(docs: Vec<Value>, page: Page) -> Option<Vec<Value>> {
    let docs: Vec<Value> = docs
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.size as usize)
        .collect();
    (!docs.is_empty()).then_some(docs)
}

fn matches_filter(doc: &Value, filter: &NestedFilter) -> bool {
    let leaf = filter.field.rsplit('.').next().unwrap_or(&filter.field);
    doc[&filter.path]
        .as_array()
        .map(|items| items.iter().any(|item| item[leaf] == filter.value.as_str()))
        .unwrap_or(false)
}

fn sort_key(doc: &Value, field: &str) -> String {
    // "title.raw" is the keyword view of "title"
    let value = &doc[field.trim_end_matches(".raw")];
    match value.as_f64() {
        Some(number) => format!("{number:020.4}"),
        None => value.as_str().unwrap_or_default().to_string(),
    }
}

#[async_trait]
impl SearchPort for FakeSearch {
    fn backend_name(&self) -> &'static str {
        "fake"
    }

    async fn get_by_id(&self, index: &str, id: &str) -> Result<Option<Value>> {
        self.enter()?;
        Ok(self.index(index).into_iter().find(|doc| doc["uuid"] == id))
    }

    async fn list_all(
        &self,
        index: &str,
        page: Page,
        filter: Option<&NestedFilter>,
        sort: Option<&SortSpec>,
    ) -> Result<Option<Vec<Value>>> {
        self.enter()?;
        let mut docs: Vec<Value> = self
            .index(index)
            .into_iter()
            .filter(|doc| filter.map_or(true, |f| matches_filter(doc, f)))
            .collect();
        if let Some(sort) = sort {
            docs.sort_by_key(|doc| sort_key(doc, &sort.field));
            if sort.descending {
                docs.reverse();
            }
        }
        Ok(paginate(docs, page))
    }

    async fn search_by_query(
        &self,
        index: &str,
        page: Page,
        field: &str,
        query: Option<&str>,
    ) -> Result<Option<Vec<Value>>> {
        self.enter()?;
        let needle = query.unwrap_or_default().trim().to_lowercase();
        let docs: Vec<Value> = self
            .index(index)
            .into_iter()
            .filter(|doc| {
                needle.is_empty()
                    || doc[field]
                        .as_str()
                        .map_or(false, |text| text.to_lowercase().contains(&needle))
            })
            .collect();
        Ok(paginate(docs, page))
    }

    async fn ping(&self) -> Result<()> {
        self.enter()
    }
}

// == Failing Cache ==
/// Cache whose every operation fails as if the store were unreachable.
pub struct FailingCache;

fn down() -> GatewayError {
    GatewayError::CacheUnavailable("connection refused".to_string())
}

#[async_trait]
impl CachePort for FailingCache {
    fn backend_name(&self) -> &'static str {
        "failing"
    }

    async fn get(&self, _key: &CacheKey) -> Result<Option<String>> {
        Err(down())
    }

    async fn set(&self, _key: &CacheKey, _value: String, _ttl_seconds: u64) -> Result<()> {
        Err(down())
    }

    async fn read_list(&self, _key: &CacheKey) -> Result<Vec<String>> {
        Err(down())
    }

    async fn replace_list(
        &self,
        _key: &CacheKey,
        _values: Vec<String>,
        _ttl_seconds: u64,
    ) -> Result<()> {
        Err(down())
    }

    async fn ping(&self) -> Result<()> {
        Err(down())
    }
}
