//! Shared test doubles for the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use movies_gateway::api::create_router;
use movies_gateway::cache::{CacheKey, CachePort, MemoryCache};
use movies_gateway::error::Result;
use movies_gateway::search::{NestedFilter, Page, SearchPort, SortSpec};
use movies_gateway::{AppState, Config, GatewayError};
use serde_json::Value;

/// Search backend over fixed documents, counting every call.
#[derive(Default)]
pub struct StubSearch {
    docs: HashMap<String, Vec<Value>>,
    calls: AtomicUsize,
}

impl StubSearch {
    pub fn with_doc(mut self, index: &str, doc: Value) -> Self {
        self.docs.entry(index.to_string()).or_default().push(doc);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn docs(&self, index: &str) -> Vec<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.docs.get(index).cloned().unwrap_or_default()
    }
}

fn page_of(docs: Vec<Value>, page: Page) -> Option<Vec<Value>> {
    let docs: Vec<Value> = docs
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.size as usize)
        .collect();
    (!docs.is_empty()).then_some(docs)
}

#[async_trait]
impl SearchPort for StubSearch {
    fn backend_name(&self) -> &'static str {
        "stub"
    }

    async fn get_by_id(&self, index: &str, id: &str) -> Result<Option<Value>> {
        Ok(self.docs(index).into_iter().find(|doc| doc["uuid"] == id))
    }

    async fn list_all(
        &self,
        index: &str,
        page: Page,
        filter: Option<&NestedFilter>,
        sort: Option<&SortSpec>,
    ) -> Result<Option<Vec<Value>>> {
        let mut docs: Vec<Value> = self
            .docs(index)
            .into_iter()
            .filter(|doc| {
                filter.map_or(true, |f| {
                    doc[&f.path]
                        .as_array()
                        .map_or(false, |items| items.iter().any(|i| i["uuid"] == f.value.as_str()))
                })
            })
            .collect();
        if let Some(sort) = sort {
            let field = sort.field.trim_end_matches(".raw").to_string();
            docs.sort_by(|a, b| {
                let (a, b) = (&a[&field], &b[&field]);
                match (a.as_f64(), b.as_f64()) {
                    (Some(x), Some(y)) => x.total_cmp(&y),
                    _ => a.as_str().cmp(&b.as_str()),
                }
            });
            if sort.descending {
                docs.reverse();
            }
        }
        Ok(page_of(docs, page))
    }

    async fn search_by_query(
        &self,
        index: &str,
        page: Page,
        field: &str,
        query: Option<&str>,
    ) -> Result<Option<Vec<Value>>> {
        let needle = query.unwrap_or_default().to_lowercase();
        let docs = self
            .docs(index)
            .into_iter()
            .filter(|doc| {
                doc[field]
                    .as_str()
                    .map_or(false, |text| text.to_lowercase().contains(&needle))
            })
            .collect();
        Ok(page_of(docs, page))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

/// Cache that is always unreachable.
pub struct DownCache;

fn down() -> GatewayError {
    GatewayError::CacheUnavailable("connection refused".to_string())
}

#[async_trait]
impl CachePort for DownCache {
    fn backend_name(&self) -> &'static str {
        "down"
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

pub fn app_with(cache: Arc<dyn CachePort>, search: Arc<StubSearch>) -> Router {
    create_router(AppState::new(cache, search, &Config::default()))
}

/// Router over an in-process cache; the cache and search handles stay
/// available for assertions.
pub fn memory_app(search: StubSearch) -> (Router, MemoryCache, Arc<StubSearch>) {
    let cache = MemoryCache::new();
    let search = Arc::new(search);
    let app = app_with(Arc::new(cache.clone()), search.clone());
    (app, cache, search)
}
