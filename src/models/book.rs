//! Book model

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::validation::{self, escape_in_place, is_object_id, trim_in_place, FormInput};

/// Book document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    /// Author reference; not enforced by the store
    pub author: ObjectId,
    pub summary: String,
    pub isbn: String,
    /// Genre references; not enforced by the store
    #[serde(default)]
    pub genre: Vec<ObjectId>,
}

impl Book {
    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.id.to_hex())
    }

    pub fn has_genre(&self, genre: &ObjectId) -> bool {
        self.genre.contains(genre)
    }
}

/// Create/update book form. `genre` arrives as repeated checkbox keys.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct BookForm {
    #[validate(length(min = 1, message = "Title must not be empty."))]
    pub title: String,
    #[validate(custom(function = "author_reference"))]
    pub author: String,
    #[validate(length(min = 1, message = "Summary must not be empty."))]
    pub summary: String,
    #[validate(length(min = 1, message = "ISBN must not be empty"))]
    pub isbn: String,
    #[validate(custom(function = "genre_references"))]
    pub genre: Vec<String>,
}

impl BookForm {
    pub fn author_id(&self) -> Option<ObjectId> {
        ObjectId::parse_str(&self.author).ok()
    }

    pub fn genre_ids(&self) -> Vec<ObjectId> {
        self.genre
            .iter()
            .filter_map(|g| ObjectId::parse_str(g).ok())
            .collect()
    }

    /// Whether the form currently has the given genre ticked
    pub fn has_genre(&self, genre: &ObjectId) -> bool {
        let hex = genre.to_hex();
        self.genre.iter().any(|g| *g == hex)
    }
}

fn author_reference(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(validation::error("required", "Author must not be empty."));
    }
    if !is_object_id(value) {
        return Err(validation::error("reference", "Author must be a valid selection."));
    }
    Ok(())
}

fn genre_references(values: &[String]) -> Result<(), ValidationError> {
    if values.iter().all(|v| is_object_id(v)) {
        Ok(())
    } else {
        Err(validation::error("reference", "Genre must be a valid selection."))
    }
}

impl FormInput for BookForm {
    const FIELDS: &'static [&'static str] = &["title", "author", "summary", "isbn", "genre"];

    fn trim(&mut self) {
        trim_in_place(&mut self.title);
        trim_in_place(&mut self.author);
        trim_in_place(&mut self.summary);
        trim_in_place(&mut self.isbn);
        self.genre.iter_mut().for_each(trim_in_place);
        self.genre.retain(|g| !g.is_empty());
    }

    fn escape(&mut self) {
        escape_in_place(&mut self.title);
        escape_in_place(&mut self.author);
        escape_in_place(&mut self.summary);
        escape_in_place(&mut self.isbn);
        self.genre.iter_mut().for_each(escape_in_place);
    }
}

impl From<&Book> for BookForm {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.to_hex(),
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            genre: book.genre.iter().map(|g| g.to_hex()).collect(),
        }
    }
}
