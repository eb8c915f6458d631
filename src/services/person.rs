//! Person Service
//!
//! Person lookups, plus the films a person took part in. Person films are
//! cached separately from the person record itself.

use crate::cache::build_key;
use crate::error::Result;
use crate::models::{Person, PersonFilm};
use crate::search::Page;
use crate::services::{decode_document, decode_documents, ReadThrough};

pub const PERSON_KEY_PREFIX: &str = "PersonService";

const SEARCH_FIELD: &str = "full_name";

#[derive(Clone)]
pub struct PersonService {
    store: ReadThrough,
    index: String,
    ttl: u64,
}

impl PersonService {
    /// Creates a person service reading `index`, caching for `ttl` seconds.
    pub fn new(store: ReadThrough, index: impl Into<String>, ttl: u64) -> Self {
        Self {
            store,
            index: index.into(),
            ttl,
        }
    }

    /// Reads one person by id; `None` when the index has no such person.
    pub async fn get_by_id(&self, person_id: &str) -> Result<Option<Person>> {
        let key = build_key(PERSON_KEY_PREFIX, [person_id])?;
        self.store
            .fetch_one(&key, &self.index, person_id, self.ttl)
            .await
    }

    /// Lists one page of persons.
    pub async fn get_all(&self, page: Page) -> Result<Option<Vec<Person>>> {
        let key = build_key(
            PERSON_KEY_PREFIX,
            ["list".to_string(), page.number.to_string(), page.size.to_string()],
        )?;
        self.store
            .fetch_list(&key, self.ttl, self.list_from_search(page))
            .await
    }

    /// Fuzzy search on the person's full name.
    pub async fn get_search(&self, page: Page, query: Option<&str>) -> Result<Option<Vec<Person>>> {
        let query = query.map(str::trim).unwrap_or_default();
        let key = build_key(
            PERSON_KEY_PREFIX,
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

    /// Films listed on the person's document, in document order.
    ///
    /// `None` when the person is unknown or has no films.
    pub async fn get_person_films(&self, person_id: &str) -> Result<Option<Vec<PersonFilm>>> {
        // Scoped under its own prefix so it never shares a key with the person record
        let prefix = format!("{PERSON_KEY_PREFIX}_films");
        let key = build_key(&prefix, [person_id])?;
        self.store
            .fetch_list(&key, self.ttl, self.films_from_search(person_id))
            .await
    }

    async fn list_from_search(&self, page: Page) -> Result<Option<Vec<Person>>> {
        let docs = self
            .store
            .search()
            .list_all(&self.index, page, None, None)
            .await?;
        docs.map(|docs| decode_documents(&self.index, docs))
            .transpose()
    }

    async fn search_from_search(&self, page: Page, query: &str) -> Result<Option<Vec<Person>>> {
        let docs = self
            .store
            .search()
            .search_by_query(&self.index, page, SEARCH_FIELD, Some(query))
            .await?;
        docs.map(|docs| decode_documents(&self.index, docs))
            .transpose()
    }

    async fn films_from_search(&self, person_id: &str) -> Result<Option<Vec<PersonFilm>>> {
        let Some(doc) = self.store.search().get_by_id(&self.index, person_id).await? else {
            return Ok(None);
        };
        let person: Person = decode_document(&self.index, doc)?;
        Ok(person.films.filter(|films| !films.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheExt, MemoryCache};
    use crate::services::fakes::FakeSearch;
    use serde_json::json;
    use std::sync::Arc;

    fn persons() -> FakeSearch {
        FakeSearch::new()
            .with_doc(
                "persons",
                json!({
                    "uuid": "p1",
                    "full_name": "Ann Lee",
                    "films": [
                        { "uuid": "f2", "title": "Astra", "imdb_rating": 6.1, "roles": ["writer"] },
                        { "uuid": "f1", "title": "Nova", "imdb_rating": 8.5, "roles": ["actor", "director"] }
                    ]
                }),
            )
            .with_doc("persons", json!({ "uuid": "p2", "full_name": "Bo Sun", "films": [] }))
    }

    fn service(search: FakeSearch) -> (PersonService, MemoryCache, Arc<FakeSearch>) {
        let cache = MemoryCache::new();
        let search = Arc::new(search);
        let store = ReadThrough::new(Arc::new(cache.clone()), search.clone());
        (PersonService::new(store, "persons", 300), cache, search)
    }

    #[tokio::test]
    async fn test_get_by_id_and_search() {
        let (service, _cache, _search) = service(persons());

        let person = service.get_by_id("p1").await.unwrap().unwrap();
        assert_eq!(person.full_name, "Ann Lee");

        let found = service.get_search(Page::new(1, 10), Some("sun")).await.unwrap().unwrap();
        assert_eq!(found[0].uuid, "p2");
    }

    #[tokio::test]
    async fn test_get_all() {
        let (service, _cache, _search) = service(persons());

        let all = service.get_all(Page::new(1, 50)).await.unwrap().unwrap();
        assert_eq!(all.len(), 2);
        assert!(service.get_all(Page::new(2, 50)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_person_films_cached_under_own_key() {
        let (service, cache, search) = service(persons());

        let films = service.get_person_films("p1").await.unwrap().unwrap();
        let ids: Vec<&str> = films.iter().map(|f| f.uuid.as_str()).collect();
        assert_eq!(ids, vec!["f2", "f1"]);

        let key = build_key("PersonService_films", ["p1"]).unwrap();
        let cached: Vec<PersonFilm> = cache.get_list(&key).await.unwrap().unwrap();
        assert_eq!(cached, films);

        // The person record itself is not cached by this call
        let person_key = build_key(PERSON_KEY_PREFIX, ["p1"]).unwrap();
        assert!(cache.get_one::<Person>(&person_key).await.unwrap().is_none());

        service.get_person_films("p1").await.unwrap();
        assert_eq!(search.calls(), 1);
    }

    #[tokio::test]
    async fn test_person_films_absent() {
        let (service, cache, _search) = service(persons());

        assert!(service.get_person_films("p2").await.unwrap().is_none());
        assert!(service.get_person_films("p9").await.unwrap().is_none());
        assert!(cache.is_empty().await);
    }
}
