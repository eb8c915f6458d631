//! Services Module
//!
//! Cache-aside read services for each entity kind, built on one shared
//! read-through component.

mod film;
mod genre;
mod person;
mod read_through;

#[cfg(test)]
pub(crate) mod fakes;

pub use film::{FilmService, FILM_KEY_PREFIX};
pub use genre::{GenreService, GENRE_KEY_PREFIX};
pub use person::{PersonService, PERSON_KEY_PREFIX};
pub use read_through::{decode_document, decode_documents, ReadThrough};
