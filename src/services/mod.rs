//! Business logic services

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;

use crate::{error::AppError, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub authors: authors::AuthorService,
    pub genres: genres::GenreService,
    pub books: books::BookService,
    pub book_instances: book_instances::BookInstanceService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            authors: authors::AuthorService::new(repository.clone()),
            genres: genres::GenreService::new(repository.clone()),
            books: books::BookService::new(repository.clone()),
            book_instances: book_instances::BookInstanceService::new(repository),
        }
    }
}

/// Result of a create request
#[derive(Debug, Clone, PartialEq)]
pub enum Saved<T> {
    /// A new record was stored
    Created(T),
    /// A record with the same natural key already existed; nothing stored
    Existing(T),
}

impl<T> Saved<T> {
    pub fn into_inner(self) -> T {
        match self {
            Saved::Created(record) | Saved::Existing(record) => record,
        }
    }
}

/// Result of an update request
#[derive(Debug, Clone, PartialEq)]
pub enum Updated<T> {
    /// The record was rewritten in place
    Replaced(T),
    /// The new natural key belonged to another record: dependents were moved
    /// onto that record and the edited one was deleted
    Merged(T),
}

impl<T> Updated<T> {
    pub fn into_inner(self) -> T {
        match self {
            Updated::Replaced(record) | Updated::Merged(record) => record,
        }
    }
}

/// Result of a delete request
#[derive(Debug, Clone, PartialEq)]
pub enum Deletion<T, D> {
    Deleted,
    /// Other records still reference this one
    Blocked { record: T, dependents: Vec<D> },
}

/// A form reference that does not parse; validated forms never produce one
pub(crate) fn invalid_reference(what: &str) -> AppError {
    AppError::BadRequest(format!("Invalid {} reference", what))
}
