//! API Module
//!
//! HTTP handlers and routing for the gateway REST API.
//!
//! # Endpoints
//! - `GET /api/v1/films` - Paginated film listing, optional genre filter and sort
//! - `GET /api/v1/films/search` - Film title search
//! - `GET /api/v1/films/:film_id` - Film details
//! - `GET /api/v1/genres`, `/api/v1/genres/search`, `/api/v1/genres/:genre_id`
//! - `GET /api/v1/persons`, `/api/v1/persons/search`, `/api/v1/persons/:person_id`
//! - `GET /api/v1/persons/:person_id/film` - Films a person took part in
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
