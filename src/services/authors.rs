//! Author service

use mongodb::bson::oid::ObjectId;

use super::{Deletion, Saved, Updated};
use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorForm, Book},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthorService {
    repository: Repository,
}

fn not_found() -> AppError {
    AppError::NotFound("Author not found".to_string())
}

impl AuthorService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list().await
    }

    pub async fn get(&self, id: ObjectId) -> AppResult<Author> {
        self.repository.authors.find(id).await?.ok_or_else(not_found)
    }

    /// Author with their books, fetched concurrently
    pub async fn detail(&self, id: ObjectId) -> AppResult<(Author, Vec<Book>)> {
        let (author, books) = tokio::try_join!(
            self.repository.authors.find(id),
            self.repository.books.by_author(id),
        )?;
        Ok((author.ok_or_else(not_found)?, books))
    }

    pub async fn create(&self, form: &AuthorForm) -> AppResult<Saved<Author>> {
        if let Some(existing) = self
            .repository
            .authors
            .find_by_name(&form.first_name, &form.family_name)
            .await?
        {
            tracing::debug!("Author '{}' already exists as {}", existing.name(), existing.id);
            return Ok(Saved::Existing(existing));
        }

        let author = Author {
            id: ObjectId::new(),
            first_name: form.first_name.clone(),
            family_name: form.family_name.clone(),
            date_of_birth: form.date_of_birth(),
            date_of_death: form.date_of_death(),
        };
        self.repository.authors.insert(&author).await?;
        tracing::info!("Created author {} '{}'", author.id, author.name());
        Ok(Saved::Created(author))
    }

    /// Delete an author with no books
    pub async fn delete(&self, id: ObjectId) -> AppResult<Deletion<Author, Book>> {
        let (author, books) = self.detail(id).await?;
        if !books.is_empty() {
            return Ok(Deletion::Blocked {
                record: author,
                dependents: books,
            });
        }

        self.repository.authors.delete(id).await?;
        tracing::info!("Deleted author {} '{}'", author.id, author.name());
        Ok(Deletion::Deleted)
    }

    /// Edit an author. Renaming onto another author's name folds this
    /// author's books into that author and removes this record.
    pub async fn update(&self, id: ObjectId, form: &AuthorForm) -> AppResult<Updated<Author>> {
        let mut author = self.get(id).await?;

        if let Some(existing) = self
            .repository
            .authors
            .find_by_name(&form.first_name, &form.family_name)
            .await?
        {
            if existing.id != id {
                let moved = self.repository.books.reassign_author(id, existing.id).await?;
                self.repository.authors.delete(id).await?;
                tracing::info!(
                    "Merged author {} into {} '{}' ({} books moved)",
                    id,
                    existing.id,
                    existing.name(),
                    moved
                );
                return Ok(Updated::Merged(existing));
            }
        }

        author.first_name = form.first_name.clone();
        author.family_name = form.family_name.clone();
        author.date_of_birth = form.date_of_birth();
        author.date_of_death = form.date_of_death();
        if !self.repository.authors.replace(&author).await? {
            return Err(not_found());
        }
        tracing::info!("Updated author {} '{}'", author.id, author.name());
        Ok(Updated::Replaced(author))
    }
}
