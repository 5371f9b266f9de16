//! Genre service

use mongodb::bson::oid::ObjectId;

use super::{Deletion, Saved, Updated};
use crate::{
    error::{AppError, AppResult},
    models::{Book, Genre, GenreForm},
    repository::Repository,
};

#[derive(Clone)]
pub struct GenreService {
    repository: Repository,
}

fn not_found() -> AppError {
    AppError::NotFound("Genre not found".to_string())
}

impl GenreService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        self.repository.genres.list().await
    }

    pub async fn get(&self, id: ObjectId) -> AppResult<Genre> {
        self.repository.genres.find(id).await?.ok_or_else(not_found)
    }

    /// Genre with the books tagged with it, fetched concurrently
    pub async fn detail(&self, id: ObjectId) -> AppResult<(Genre, Vec<Book>)> {
        let (genre, books) = tokio::try_join!(
            self.repository.genres.find(id),
            self.repository.books.by_genre(id),
        )?;
        Ok((genre.ok_or_else(not_found)?, books))
    }

    /// Store a new genre unless one with the same name (ignoring case) exists
    pub async fn create(&self, form: &GenreForm) -> AppResult<Saved<Genre>> {
        if let Some(existing) = self.repository.genres.find_by_name(&form.name).await? {
            tracing::debug!("Genre '{}' already exists as {}", form.name, existing.id);
            return Ok(Saved::Existing(existing));
        }

        let genre = Genre::new(form.name.clone());
        self.repository.genres.insert(&genre).await?;
        tracing::info!("Created genre {} '{}'", genre.id, genre.name);
        Ok(Saved::Created(genre))
    }

    /// Delete a genre no book refers to
    pub async fn delete(&self, id: ObjectId) -> AppResult<Deletion<Genre, Book>> {
        let (genre, books) = self.detail(id).await?;
        if !books.is_empty() {
            return Ok(Deletion::Blocked {
                record: genre,
                dependents: books,
            });
        }

        self.repository.genres.delete(id).await?;
        tracing::info!("Deleted genre {} '{}'", genre.id, genre.name);
        Ok(Deletion::Deleted)
    }

    /// Rename a genre. Renaming onto another genre's name folds this genre
    /// into that one: its books move over and this record is removed.
    pub async fn update(&self, id: ObjectId, form: &GenreForm) -> AppResult<Updated<Genre>> {
        let mut genre = self.get(id).await?;

        if let Some(existing) = self.repository.genres.find_by_name(&form.name).await? {
            if existing.id != id {
                let moved = self.repository.books.reassign_genre(id, existing.id).await?;
                self.repository.genres.delete(id).await?;
                tracing::info!(
                    "Merged genre {} into {} '{}' ({} books moved)",
                    id,
                    existing.id,
                    existing.name,
                    moved
                );
                return Ok(Updated::Merged(existing));
            }
        }

        genre.name = form.name.clone();
        if !self.repository.genres.replace(&genre).await? {
            return Err(not_found());
        }
        tracing::info!("Updated genre {} '{}'", genre.id, genre.name);
        Ok(Updated::Replaced(genre))
    }
}
