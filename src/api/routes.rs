//! API Routes
//!
//! Configures the Axum router with all gateway endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    get_film_handler, get_genre_handler, get_person_handler, health_handler, list_films_handler,
    list_genres_handler, list_persons_handler, person_films_handler, search_films_handler,
    search_genres_handler, search_persons_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// The static `search` segments take precedence over the id captures.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/films", get(list_films_handler))
        .route("/films/search", get(search_films_handler))
        .route("/films/:film_id", get(get_film_handler))
        .route("/genres", get(list_genres_handler))
        .route("/genres/search", get(search_genres_handler))
        .route("/genres/:genre_id", get(get_genre_handler))
        .route("/persons", get(list_persons_handler))
        .route("/persons/search", get(search_persons_handler))
        .route("/persons/:person_id", get(get_person_handler))
        .route("/persons/:person_id/film", get(person_films_handler));

    Router::new()
        .nest("/api/v1", api)
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::config::Config;
    use crate::services::fakes::{sample_film, FakeSearch};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::json;
    use std::sync::Arc;
    use tower::util::ServiceExt;

    const FILM_ID: &str = "6a0a479b-cfec-41ac-b520-41b2b007b611";

    fn create_test_app() -> Router {
        let search = FakeSearch::new()
            .with_doc("movies", sample_film(FILM_ID, "Nova", 8.5))
            .with_doc("genres", json!({ "uuid": "g1", "name": "Drama" }));
        let state = AppState::new(
            Arc::new(MemoryCache::new()),
            Arc::new(search),
            &Config::default(),
        );
        create_router(state)
    }

    async fn status_of(uri: &str) -> StatusCode {
        create_test_app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        assert_eq!(status_of("/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_film_endpoint() {
        assert_eq!(status_of(&format!("/api/v1/films/{FILM_ID}")).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_search_is_not_an_id() {
        assert_eq!(status_of("/api/v1/films/search?query=nova").await, StatusCode::OK);
        assert_eq!(status_of("/api/v1/genres/search?query=dra").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_bad_query_is_unprocessable() {
        assert_eq!(
            status_of("/api/v1/films?page_number=abc").await,
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of("/api/v1/films?sort=budget").await,
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[tokio::test]
    async fn test_unknown_route() {
        assert_eq!(status_of("/api/v1/studios").await, StatusCode::NOT_FOUND);
    }
}
