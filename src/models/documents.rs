//! Stored document shapes for films, genres, and persons.
//!
//! These mirror the documents in the search index and are what the cache
//! stores. Optional fields may be missing from a document.

use serde::{Deserialize, Serialize};

/// Genre as embedded in a film document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreRef {
    pub uuid: String,
    pub name: String,
}

/// Person as embedded in a film document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRef {
    pub uuid: String,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Film {
    pub uuid: String,
    pub title: String,
    #[serde(default)]
    pub imdb_rating: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub genre: Option<Vec<GenreRef>>,
    #[serde(default)]
    pub directors: Option<Vec<PersonRef>>,
    #[serde(default)]
    pub actors: Option<Vec<PersonRef>>,
    #[serde(default)]
    pub writers: Option<Vec<PersonRef>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A film as embedded in a person document, with the person's roles in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonFilm {
    pub uuid: String,
    pub title: String,
    #[serde(default)]
    pub imdb_rating: Option<f64>,
    #[serde(default)]
    pub roles: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub uuid: String,
    pub full_name: String,
    #[serde(default)]
    pub films: Option<Vec<PersonFilm>>,
}
