//! Film Service
//!
//! Film reads through the cache, with genre filtering and sorting on listings.

use crate::cache::build_key;
use crate::error::Result;
use crate::models::Film;
use crate::search::{NestedFilter, Page, SortSpec};
use crate::services::{decode_documents, ReadThrough};

pub const FILM_KEY_PREFIX: &str = "FilmService";

/// Field matched by free-text film search
const SEARCH_FIELD: &str = "title";

/// Nested collection and id field used for genre membership
const GENRE_PATH: &str = "genre";
const GENRE_ID_FIELD: &str = "genre.uuid";

#[derive(Clone)]
pub struct FilmService {
    store: ReadThrough,
    index: String,
    ttl: u64,
}

impl FilmService {
    /// Creates a film service reading `index`, caching for `ttl` seconds.
    pub fn new(store: ReadThrough, index: impl Into<String>, ttl: u64) -> Self {
        Self {
            store,
            index: index.into(),
            ttl,
        }
    }

    /// Reads one film by id; `None` when the index has no such film.
    pub async fn get_by_id(&self, film_id: &str) -> Result<Option<Film>> {
        let key = build_key(FILM_KEY_PREFIX, [film_id])?;
        self.store
            .fetch_one(&key, &self.index, film_id, self.ttl)
            .await
    }

    /// Lists films, optionally restricted to one genre and sorted.
    pub async fn get_all(
        &self,
        page: Page,
        genre: Option<&str>,
        sort: Option<&SortSpec>,
    ) -> Result<Option<Vec<Film>>> {
        let sort_arg = sort.map(ToString::to_string).unwrap_or_default();
        let key = build_key(
            FILM_KEY_PREFIX,
            [
                "list".to_string(),
                page.number.to_string(),
                page.size.to_string(),
                genre.unwrap_or_default().to_string(),
                sort_arg,
            ],
        )?;

        let filter = genre.map(|id| NestedFilter::new(GENRE_PATH, GENRE_ID_FIELD, id));
        self.store
            .fetch_list(&key, self.ttl, self.list_from_search(page, filter.as_ref(), sort))
            .await
    }

    /// Fuzzy search on the film title.
    pub async fn get_search(&self, page: Page, query: Option<&str>) -> Result<Option<Vec<Film>>> {
        let query = query.map(str::trim).unwrap_or_default();
        let key = build_key(
            FILM_KEY_PREFIX,
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

    async fn list_from_search(
        &self,
        page: Page,
        filter: Option<&NestedFilter>,
        sort: Option<&SortSpec>,
    ) -> Result<Option<Vec<Film>>> {
        let docs = self
            .store
            .search()
            .list_all(&self.index, page, filter, sort)
            .await?;
        docs.map(|docs| decode_documents(&self.index, docs))
            .transpose()
    }

    async fn search_from_search(&self, page: Page, query: &str) -> Result<Option<Vec<Film>>> {
        let docs = self
            .store
            .search()
            .search_by_query(&self.index, page, SEARCH_FIELD, Some(query))
            .await?;
        docs.map(|docs| decode_documents(&self.index, docs))
            .transpose()
    }
}
