//! Elasticsearch Module
//!
//! Search backend over the Elasticsearch REST API.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::error::{GatewayError, Result};
use crate::search::query::{list_body, search_body};
use crate::search::{NestedFilter, Page, SearchPort, SortSpec};

/// Only document sources are needed from search responses.
const SOURCE_FILTER: &str = "hits.hits._source";

// == Response Shapes ==
#[derive(Debug, Deserialize)]
struct GetResponse {
    #[serde(default)]
    found: bool,
    #[serde(rename = "_source")]
    source: Option<Value>,
}

/// With `filter_path`, an empty result set comes back as `{}`.
#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Option<Hits>,
}

#[derive(Debug, Default, Deserialize)]
struct Hits {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "_source")]
    source: Value,
}

// == Elastic Search ==
/// Elasticsearch client. Cloning shares the connection pool.
#[derive(Debug, Clone)]
pub struct ElasticSearch {
    client: Client,
    base_url: String,
}

impl ElasticSearch {
    /// Creates a client for the cluster at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    async fn search(&self, index: &str, body: Value) -> Result<Option<Vec<Value>>> {
        let url = format!("{}/{}/_search", self.base_url, index);
        debug!(index, %body, "Searching");

        let response = self
            .client
            .post(&url)
            .query(&[("filter_path", SOURCE_FILTER)])
            .json(&body)
            .send()
            .await
            .map_err(|e| unavailable(index, e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = ensure_success(index, response).await?;
        let parsed: SearchResponse = response.json().await.map_err(|e| unavailable(index, e))?;

        let docs: Vec<Value> = parsed
            .hits
            .unwrap_or_default()
            .hits
            .into_iter()
            .map(|hit| hit.source)
            .collect();

        if docs.is_empty() {
            Ok(None)
        } else {
            Ok(Some(docs))
        }
    }
}

fn unavailable(index: &str, err: reqwest::Error) -> GatewayError {
    error!(index, "Elasticsearch request failed: {}", err);
    GatewayError::BackendUnavailable(format!("elasticsearch request to '{index}' failed: {err}"))
}

/// Splits non-success statuses into rejected requests (4xx) and outages.
async fn ensure_success(index: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();

    if status.is_client_error() {
        warn!(index, %status, "Elasticsearch rejected the request: {}", body);
        return Err(GatewayError::InvalidRequest(format!(
            "search backend rejected the request for '{index}' ({status})"
        )));
    }

    error!(index, %status, "Elasticsearch returned an error: {}", body);
    Err(GatewayError::BackendUnavailable(format!(
        "elasticsearch returned {status} for '{index}'"
    )))
}

#[async_trait]
impl SearchPort for ElasticSearch {
    fn backend_name(&self) -> &'static str {
        "elasticsearch"
    }

    async fn get_by_id(&self, index: &str, id: &str) -> Result<Option<Value>> {
        let url = format!("{}/{}/_doc/{}", self.base_url, index, id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| unavailable(index, e))?;

        // Missing document and missing index both answer 404
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = ensure_success(index, response).await?;
        let parsed: GetResponse = response.json().await.map_err(|e| unavailable(index, e))?;

        Ok(parsed.source.filter(|_| parsed.found))
    }

    async fn list_all(
        &self,
        index: &str,
        page: Page,
        filter: Option<&NestedFilter>,
        sort: Option<&SortSpec>,
    ) -> Result<Option<Vec<Value>>> {
        self.search(index, list_body(page, filter, sort)).await
    }

    async fn search_by_query(
        &self,
        index: &str,
        page: Page,
        field: &str,
        query: Option<&str>,
    ) -> Result<Option<Vec<Value>>> {
        self.search(index, search_body(page, field, query)).await
    }

    async fn ping(&self) -> Result<()> {
        let response = self
            .client
            .get(&self.base_url)
            .send()
            .await
            .map_err(|e| unavailable("-", e))?;
        ensure_success("-", response).await.map(|_| ())
    }
}
