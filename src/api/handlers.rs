//! API Handlers
//!
//! HTTP request handlers for the film, genre, and person endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use tracing::warn;

use crate::cache::CachePort;
use crate::config::Config;
use crate::error::{GatewayError, Result};
use crate::models::requests::{validate_uuid, MAX_GENRE_PAGE_VALUE, MAX_PAGE_VALUE};
use crate::models::{
    FilmDetail, FilmListQuery, FilmSummary, GenreView, HealthResponse, PageQuery, Paginated,
    PersonView, SearchQuery,
};
use crate::search::SearchPort;
use crate::services::{FilmService, GenreService, PersonService, ReadThrough};

/// Application state shared across all handlers.
///
/// Built once at startup; every service shares the same two ports.
#[derive(Clone)]
pub struct AppState {
    pub films: FilmService,
    pub genres: GenreService,
    pub persons: PersonService,
    pub cache: Arc<dyn CachePort>,
    pub search: Arc<dyn SearchPort>,
}

impl AppState {
    pub fn new(cache: Arc<dyn CachePort>, search: Arc<dyn SearchPort>, config: &Config) -> Self {
        let store = ReadThrough::new(cache.clone(), search.clone());
        Self {
            films: FilmService::new(store.clone(), &config.films_index, config.films_cache_ttl),
            genres: GenreService::new(store.clone(), &config.genres_index, config.genres_cache_ttl),
            persons: PersonService::new(store, &config.persons_index, config.persons_cache_ttl),
            cache,
            search,
        }
    }
}

/// Unwraps a query extraction, turning a malformed query string into a 422.
fn query_params<T>(query: std::result::Result<Query<T>, QueryRejection>) -> Result<T> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| GatewayError::InvalidRequest(rejection.body_text()))
}

fn check(problem: Option<String>) -> Result<()> {
    match problem {
        Some(message) => Err(GatewayError::InvalidRequest(message)),
        None => Ok(()),
    }
}

fn found<T>(value: Option<T>, what: &str) -> Result<T> {
    value.ok_or_else(|| GatewayError::NotFound(format!("{what} not found")))
}

// == Films ==

/// Handler for GET /api/v1/films
pub async fn list_films_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<FilmListQuery>, QueryRejection>,
) -> Result<Json<Vec<FilmSummary>>> {
    let params = query_params(query)?;
    check(params.validate())?;

    let sort = params.sort.map(|sort| sort.to_spec());
    let films = state
        .films
        .get_all(params.page(), params.genre.as_deref(), sort.as_ref())
        .await?;

    let films = found(films, "films")?;
    Ok(Json(films.into_iter().map(FilmSummary::from).collect()))
}

/// Handler for GET /api/v1/films/search
pub async fn search_films_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<FilmSummary>>> {
    let params = query_params(query)?;
    check(params.validate_page(MAX_PAGE_VALUE))?;

    let films = state
        .films
        .get_search(params.page(), params.query.as_deref())
        .await?;

    let films = found(films, "films")?;
    Ok(Json(films.into_iter().map(FilmSummary::from).collect()))
}

/// Handler for GET /api/v1/films/:film_id
pub async fn get_film_handler(
    State(state): State<AppState>,
    Path(film_id): Path<String>,
) -> Result<Json<FilmDetail>> {
    check(validate_uuid("film_id", &film_id))?;

    let film = found(state.films.get_by_id(&film_id).await?, "film")?;
    Ok(Json(FilmDetail::from(film)))
}

// == Genres ==

/// Handler for GET /api/v1/genres
pub async fn list_genres_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Vec<GenreView>>> {
    let params = query_params(query)?;
    check(params.validate_page(MAX_GENRE_PAGE_VALUE))?;

    let genres = found(state.genres.get_all(params.page()).await?, "genres")?;
    Ok(Json(genres.into_iter().map(GenreView::from).collect()))
}

/// Handler for GET /api/v1/genres/search
pub async fn search_genres_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<GenreView>>> {
    let params = query_params(query)?;
    check(params.validate_page(MAX_GENRE_PAGE_VALUE))?;

    let genres = state
        .genres
        .get_search(params.page(), params.query.as_deref())
        .await?;

    let genres = found(genres, "genres")?;
    Ok(Json(genres.into_iter().map(GenreView::from).collect()))
}

/// Handler for GET /api/v1/genres/:genre_id
pub async fn get_genre_handler(
    State(state): State<AppState>,
    Path(genre_id): Path<String>,
) -> Result<Json<GenreView>> {
    check(validate_uuid("genre_id", &genre_id))?;

    let genre = found(state.genres.get_by_id(&genre_id).await?, "genre")?;
    Ok(Json(GenreView::from(genre)))
}

// == Persons ==

/// Handler for GET /api/v1/persons
pub async fn list_persons_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Vec<PersonView>>> {
    let params = query_params(query)?;
    check(params.validate_page(MAX_PAGE_VALUE))?;

    let persons = found(state.persons.get_all(params.page()).await?, "persons")?;
    Ok(Json(persons.into_iter().map(PersonView::from).collect()))
}

/// Handler for GET /api/v1/persons/search
pub async fn search_persons_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<PersonView>>> {
    let params = query_params(query)?;
    check(params.validate_page(MAX_PAGE_VALUE))?;

    let persons = state
        .persons
        .get_search(params.page(), params.query.as_deref())
        .await?;

    let persons = found(persons, "persons")?;
    Ok(Json(persons.into_iter().map(PersonView::from).collect()))
}

/// Handler for GET /api/v1/persons/:person_id
pub async fn get_person_handler(
    State(state): State<AppState>,
    Path(person_id): Path<String>,
) -> Result<Json<PersonView>> {
    check(validate_uuid("person_id", &person_id))?;

    let person = found(state.persons.get_by_id(&person_id).await?, "person")?;
    Ok(Json(PersonView::from(person)))
}

/// Handler for GET /api/v1/persons/:person_id/film
pub async fn person_films_handler(
    State(state): State<AppState>,
    Path(person_id): Path<String>,
) -> Result<Json<Vec<FilmSummary>>> {
    check(validate_uuid("person_id", &person_id))?;

    let films = found(state.persons.get_person_films(&person_id).await?, "films")?;
    Ok(Json(films.into_iter().map(FilmSummary::from).collect()))
}

/// Handler for GET /health
///
/// Always answers 200; a failing dependency only degrades the status.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let cache = match state.cache.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!(backend = state.cache.backend_name(), "Cache ping failed: {}", e);
            false
        }
    };
    let search = match state.search.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!(backend = state.search.backend_name(), "Search ping failed: {}", e);
            false
        }
    };

    Json(HealthResponse::new(cache, search))
}
