//! Repository layer for document store operations
//!
//! Each collection is reached through its own store trait so the services
//! can run against MongoDB in production and an in-memory store in tests.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod memory;

use std::sync::Arc;

use mongodb::{
    options::{Collation, CollationStrength},
    Database,
};

pub use authors::AuthorStore;
pub use book_instances::BookInstanceStore;
pub use books::BookStore;
pub use genres::GenreStore;

/// Main repository struct holding one store per collection
#[derive(Clone)]
pub struct Repository {
    pub authors: Arc<dyn AuthorStore>,
    pub genres: Arc<dyn GenreStore>,
    pub books: Arc<dyn BookStore>,
    pub book_instances: Arc<dyn BookInstanceStore>,
}

impl Repository {
    /// Create a repository backed by the given MongoDB database
    pub fn mongo(db: &Database) -> Self {
        Self {
            authors: Arc::new(authors::MongoAuthors::new(db)),
            genres: Arc::new(genres::MongoGenres::new(db)),
            books: Arc::new(books::MongoBooks::new(db)),
            book_instances: Arc::new(book_instances::MongoBookInstances::new(db)),
        }
    }

    /// Create a repository holding everything in process memory
    pub fn in_memory() -> Self {
        let store = memory::MemoryStore::default();
        Self {
            authors: Arc::new(store.clone()),
            genres: Arc::new(store.clone()),
            books: Arc::new(store.clone()),
            book_instances: Arc::new(store),
        }
    }
}

/// English collation at secondary strength: case-insensitive, accent-sensitive
pub(crate) fn case_insensitive() -> Collation {
    Collation::builder()
        .locale("en".to_string())
        .strength(CollationStrength::Secondary)
        .build()
}
