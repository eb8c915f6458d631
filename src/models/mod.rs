//! Domain and transport models
//!
//! Stored document shapes plus the DTOs used for serializing/deserializing
//! HTTP request parameters and response bodies.

pub mod documents;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use documents::{Film, Genre, GenreRef, Person, PersonFilm, PersonRef};
pub use requests::{FilmListQuery, FilmSort, PageQuery, Paginated, SearchQuery};
pub use responses::{FilmDetail, FilmSummary, GenreView, HealthResponse, PersonRole, PersonView};
