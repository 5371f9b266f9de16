//! Book instance service

use mongodb::bson::oid::ObjectId;

use super::{invalid_reference, Saved, Updated};
use crate::{
    error::{AppError, AppResult},
    models::{Book, BookInstance, BookInstanceForm},
    repository::Repository,
};

#[derive(Clone)]
pub struct BookInstanceService {
    repository: Repository,
}

fn not_found() -> AppError {
    AppError::NotFound("Book copy not found".to_string())
}

impl BookInstanceService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All copies with their book resolved
    pub async fn list(&self) -> AppResult<Vec<(BookInstance, Option<Book>)>> {
        let (instances, books) = tokio::try_join!(
            self.repository.book_instances.list(),
            self.repository.books.list(),
        )?;

        Ok(instances
            .into_iter()
            .map(|instance| {
                let book = books.iter().find(|b| b.id == instance.book).cloned();
                (instance, book)
            })
            .collect())
    }

    pub async fn get(&self, id: ObjectId) -> AppResult<BookInstance> {
        self.repository.book_instances.find(id).await?.ok_or_else(not_found)
    }

    pub async fn detail(&self, id: ObjectId) -> AppResult<(BookInstance, Option<Book>)> {
        let instance = self.get(id).await?;
        let book = self.repository.books.find(instance.book).await?;
        Ok((instance, book))
    }

    /// Books offered by the copy form
    pub async fn form_options(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// Copies have no natural key, so every valid submission is stored
    pub async fn create(&self, form: &BookInstanceForm) -> AppResult<Saved<BookInstance>> {
        let instance = BookInstance {
            id: ObjectId::new(),
            book: form.book_id().ok_or_else(|| invalid_reference("book"))?,
            imprint: form.imprint.clone(),
            status: form.status(),
            due_back: form.due_back(),
        };
        self.repository.book_instances.insert(&instance).await?;
        tracing::info!("Created book copy {} of {}", instance.id, instance.book);
        Ok(Saved::Created(instance))
    }

    /// Nothing references a copy, so deletion is never blocked
    pub async fn delete(&self, id: ObjectId) -> AppResult<()> {
        let instance = self.get(id).await?;
        self.repository.book_instances.delete(id).await?;
        tracing::info!("Deleted book copy {} of {}", instance.id, instance.book);
        Ok(())
    }

    pub async fn update(&self, id: ObjectId, form: &BookInstanceForm) -> AppResult<Updated<BookInstance>> {
        let mut instance = self.get(id).await?;
        instance.book = form.book_id().ok_or_else(|| invalid_reference("book"))?;
        instance.imprint = form.imprint.clone();
        instance.status = form.status();
        instance.due_back = form.due_back();

        if !self.repository.book_instances.replace(&instance).await? {
            return Err(not_found());
        }
        tracing::info!("Updated book copy {}", instance.id);
        Ok(Updated::Replaced(instance))
    }
}
