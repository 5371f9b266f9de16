//! Data models for the catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod date;
pub mod genre;

pub use mongodb::bson::oid::ObjectId;

// Re-export commonly used types
pub use author::{Author, AuthorForm};
pub use book::{Book, BookForm};
pub use book_instance::{BookInstance, BookInstanceForm, InstanceStatus};
pub use genre::{Genre, GenreForm};
