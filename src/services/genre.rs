//! Genre Service

use crate::cache::build_key;
use crate::error::Result;
use crate::models::Genre;
use crate::search::Page;
use crate::services::{decode_documents, ReadThrough};

pub const GENRE_KEY_PREFIX: &str = "GenreService";

const SEARCH_FIELD: &str = "name";

#[derive(Clone)]
pub struct GenreService {
    store: ReadThrough,
    index: String,
    ttl: u64,
}

impl GenreService {
    /// Creates a genre service reading `index`, caching for `ttl` seconds.
    pub fn new(store: ReadThrough, index: impl Into<String>, ttl: u64) -> Self {
        Self {
            store,
            index: index.into(),
            ttl,
        }
    }

    /// Reads one genre by id; `None` when the index has no such genre.
    pub async fn get_by_id(&self, genre_id: &str) -> Result<Option<Genre>> {
        let key = build_key(GENRE_KEY_PREFIX, [genre_id])?;
        self.store
            .fetch_one(&key, &self.index, genre_id, self.ttl)
            .await
    }

    /// Lists one page of genres.
    pub async fn get_all(&self, page: Page) -> Result<Option<Vec<Genre>>> {
        let key = build_key(
            GENRE_KEY_PREFIX,
            ["list".to_string(), page.number.to_string(), page.size.to_string()],
        )?;
        self.store
            .fetch_list(&key, self.ttl, self.list_from_search(page))
            .await
    }

    /// Fuzzy search on the genre name.
    pub async fn get_search(&self, page: Page, query: Option<&str>) -> Result<Option<Vec<Genre>>> {
        let query = query.map(str::trim).unwrap_or_default();
        let key = build_key(
            GENRE_KEY_PREFIX,
            [
                "search".to_string(),
                page.number.to_string(),
                page.size.to_string(),
                query.to_string(),
            ],
        )?;
        self.store
            .fetch_list(&key, self.ttl, self.search_from_search(page, query))
            .await
    }

    async fn list_from_search(&self, page: Page) -> Result<Option<Vec<Genre>>> {
        let docs = self
            .store
            .search()
            .list_all(&self.index, page, None, None)
            .await?;
        docs.map(|docs| decode_documents(&self.index, docs))
            .transpose()
    }

    async fn search_from_search(&self, page: Page, query: &str) -> Result<Option<Vec<Genre>>> {
        let docs = self
            .store
            .search()
            .search_by_query(&self.index, page, SEARCH_FIELD, Some(query))
            .await?;
        docs.map(|docs| decode_documents(&self.index, docs))
            .transpose()
    }
}
