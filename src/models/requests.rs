//! Request DTOs for the gateway API
//!
//! Query parameters accepted by the listing and search endpoints.

use serde::Deserialize;
use uuid::Uuid;

use crate::search::{Page, SortSpec};

/// Upper bound for page number and size on film and person endpoints
pub const MAX_PAGE_VALUE: u32 = 10_000;

/// Upper bound for page number and size on genre endpoints
pub const MAX_GENRE_PAGE_VALUE: u32 = 100;

fn default_page_number() -> u32 {
    1
}

fn default_page_size() -> u32 {
    50
}

/// Shared pagination accessors and bounds checking.
pub trait Paginated {
    fn page_number(&self) -> u32;
    fn page_size(&self) -> u32;

    /// Returns an error message if either value is outside `1..=max`.
    fn validate_page(&self, max: u32) -> Option<String> {
        for (name, value) in [
            ("page_number", self.page_number()),
            ("page_size", self.page_size()),
        ] {
            if value < 1 || value > max {
                return Some(format!("{name} must be between 1 and {max}"));
            }
        }
        None
    }

    fn page(&self) -> Page {
        Page::new(self.page_number(), self.page_size())
    }
}

/// Checks that a path or filter identifier is a UUID.
pub fn validate_uuid(name: &str, value: &str) -> Option<String> {
    match Uuid::parse_str(value) {
        Ok(_) => None,
        Err(_) => Some(format!("{name} must be a UUID, got '{value}'")),
    }
}

// == Film Sort ==
/// Sort orders accepted by the film listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum FilmSort {
    #[serde(rename = "imdb_rating")]
    Rating,
    #[serde(rename = "-imdb_rating")]
    RatingDesc,
    #[serde(rename = "title.raw")]
    Title,
    #[serde(rename = "-title.raw")]
    TitleDesc,
}

impl FilmSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilmSort::Rating => "imdb_rating",
            FilmSort::RatingDesc => "-imdb_rating",
            FilmSort::Title => "title.raw",
            FilmSort::TitleDesc => "-title.raw",
        }
    }

    pub fn to_spec(self) -> SortSpec {
        let descending = matches!(self, FilmSort::RatingDesc | FilmSort::TitleDesc);
        let field = self.as_str().trim_start_matches('-').to_string();
        SortSpec { field, descending }
    }
}

/// Query for plain listings (GET /api/v1/genres, GET /api/v1/persons)
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page_number")]
    pub page_number: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Paginated for PageQuery {
    fn page_number(&self) -> u32 {
        self.page_number
    }

    fn page_size(&self) -> u32 {
        self.page_size
    }
}

/// Query for the film listing (GET /api/v1/films)
#[derive(Debug, Clone, Deserialize)]
pub struct FilmListQuery {
    #[serde(default = "default_page_number")]
    pub page_number: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Genre UUID to filter by
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub sort: Option<FilmSort>,
}

impl Paginated for FilmListQuery {
    fn page_number(&self) -> u32 {
        self.page_number
    }

    fn page_size(&self) -> u32 {
        self.page_size
    }
}

impl FilmListQuery {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        self.validate_page(MAX_PAGE_VALUE).or_else(|| {
            self.genre
                .as_deref()
                .and_then(|genre| validate_uuid("genre", genre))
        })
    }
}

/// Query for full-text search endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    #[serde(default = "default_page_number")]
    pub page_number: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default)]
    pub query: Option<String>,
}

impl Paginated for SearchQuery {
    fn page_number(&self) -> u32 {
        self.page_number
    }

    fn page_size(&self) -> u32 {
        self.page_size
    }
}
