//! Response DTOs for the gateway API
//!
//! Public view models built from stored documents.

use serde::Serialize;

use crate::models::{Film, Genre, GenreRef, Person, PersonFilm, PersonRef};

/// Full film details (GET /api/v1/films/:film_id)
#[derive(Debug, Clone, Serialize)]
pub struct FilmDetail {
    pub uuid: String,
    pub title: String,
    pub imdb_rating: Option<f64>,
    pub description: Option<String>,
    pub genre: Option<Vec<GenreRef>>,
    pub directors: Option<Vec<PersonRef>>,
    pub actors: Option<Vec<PersonRef>>,
    pub writers: Option<Vec<PersonRef>>,
}

impl From<Film> for FilmDetail {
    fn from(film: Film) -> Self {
        Self {
            uuid: film.uuid,
            title: film.title,
            imdb_rating: film.imdb_rating,
            description: film.description,
            genre: film.genre,
            directors: film.directors,
            actors: film.actors,
            writers: film.writers,
        }
    }
}

/// Film entry in listings and searches
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilmSummary {
    pub uuid: String,
    pub title: String,
    pub imdb_rating: Option<f64>,
}

impl From<Film> for FilmSummary {
    fn from(film: Film) -> Self {
        Self {
            uuid: film.uuid,
            title: film.title,
            imdb_rating: film.imdb_rating,
        }
    }
}

impl From<PersonFilm> for FilmSummary {
    fn from(film: PersonFilm) -> Self {
        Self {
            uuid: film.uuid,
            title: film.title,
            imdb_rating: film.imdb_rating,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenreView {
    pub uuid: String,
    pub name: String,
}

impl From<Genre> for GenreView {
    fn from(genre: Genre) -> Self {
        Self {
            uuid: genre.uuid,
            name: genre.name,
        }
    }
}

/// A person's roles in one film
#[derive(Debug, Clone, Serialize)]
pub struct PersonRole {
    pub uuid: String,
    pub roles: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PersonView {
    pub uuid: String,
    pub full_name: String,
    pub films: Vec<PersonRole>,
}

impl From<Person> for PersonView {
    fn from(person: Person) -> Self {
        let films = person
            .films
            .unwrap_or_default()
            .into_iter()
            .map(|film| PersonRole {
                uuid: film.uuid,
                roles: film.roles,
            })
            .collect();
        Self {
            uuid: person.uuid,
            full_name: person.full_name,
            films,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// "healthy" when both backing stores answer, otherwise "degraded"
    pub status: String,
    pub cache: bool,
    pub search: bool,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn new(cache: bool, search: bool) -> Self {
        let status = if cache && search { "healthy" } else { "degraded" };
        Self {
            status: status.to_string(),
            cache,
            search,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
