//! Book service

use mongodb::bson::oid::ObjectId;

use super::{invalid_reference, Deletion, Saved, Updated};
use crate::{
    error::{AppError, AppResult},
    models::{Author, Book, BookForm, BookInstance, Genre},
    repository::Repository,
};

/// A book with its author resolved, for listings
#[derive(Debug, Clone)]
pub struct BookSummary {
    pub book: Book,
    /// `None` when the referenced author no longer exists
    pub author: Option<Author>,
}

/// Everything shown on a book's page
#[derive(Debug, Clone)]
pub struct BookDetail {
    pub book: Book,
    pub author: Option<Author>,
    pub genres: Vec<Genre>,
    pub instances: Vec<BookInstance>,
}

#[derive(Clone)]
pub struct BookService {
    repository: Repository,
}

fn not_found() -> AppError {
    AppError::NotFound("Book not found".to_string())
}

impl BookService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<BookSummary>> {
        let (books, authors) = tokio::try_join!(
            self.repository.books.list(),
            self.repository.authors.list(),
        )?;

        Ok(books
            .into_iter()
            .map(|book| {
                let author = authors.iter().find(|a| a.id == book.author).cloned();
                BookSummary { book, author }
            })
            .collect())
    }

    pub async fn get(&self, id: ObjectId) -> AppResult<Book> {
        self.repository.books.find(id).await?.ok_or_else(not_found)
    }

    /// Book with its copies; the author and genres are resolved once the
    /// book itself is known
    pub async fn detail(&self, id: ObjectId) -> AppResult<BookDetail> {
        let (book, instances) = tokio::try_join!(
            self.repository.books.find(id),
            self.repository.book_instances.by_book(id),
        )?;
        let book = book.ok_or_else(not_found)?;

        let (author, genres) = tokio::try_join!(
            self.repository.authors.find(book.author),
            self.repository.genres.find_many(&book.genre),
        )?;

        Ok(BookDetail {
            book,
            author,
            genres,
            instances,
        })
    }

    /// Authors and genres offered by the book form
    pub async fn form_options(&self) -> AppResult<(Vec<Author>, Vec<Genre>)> {
        tokio::try_join!(
            self.repository.authors.list(),
            self.repository.genres.list(),
        )
    }

    /// Store a new book unless one with the same ISBN (ignoring case) exists
    pub async fn create(&self, form: &BookForm) -> AppResult<Saved<Book>> {
        if let Some(existing) = self.repository.books.find_by_isbn(&form.isbn).await? {
            tracing::debug!("Book with ISBN {} already exists as {}", form.isbn, existing.id);
            return Ok(Saved::Existing(existing));
        }

        let book = Book {
            id: ObjectId::new(),
            title: form.title.clone(),
            author: form.author_id().ok_or_else(|| invalid_reference("author"))?,
            summary: form.summary.clone(),
            isbn: form.isbn.clone(),
            genre: form.genre_ids(),
        };
        self.repository.books.insert(&book).await?;
        tracing::info!("Created book {} '{}'", book.id, book.title);
        Ok(Saved::Created(book))
    }

    /// The book and its copies, for the delete confirmation page
    pub async fn with_instances(&self, id: ObjectId) -> AppResult<(Book, Vec<BookInstance>)> {
        let (book, instances) = tokio::try_join!(
            self.repository.books.find(id),
            self.repository.book_instances.by_book(id),
        )?;
        Ok((book.ok_or_else(not_found)?, instances))
    }

    /// Delete a book that has no copies
    pub async fn delete(&self, id: ObjectId) -> AppResult<Deletion<Book, BookInstance>> {
        let (book, instances) = self.with_instances(id).await?;
        if !instances.is_empty() {
            return Ok(Deletion::Blocked {
                record: book,
                dependents: instances,
            });
        }

        self.repository.books.delete(id).await?;
        tracing::info!("Deleted book {} '{}'", book.id, book.title);
        Ok(Deletion::Deleted)
    }

    /// Edit a book. Changing the ISBN to another book's ISBN folds this
    /// book's copies into that book and removes this record.
    pub async fn update(&self, id: ObjectId, form: &BookForm) -> AppResult<Updated<Book>> {
        let mut book = self.get(id).await?;

        if let Some(existing) = self.repository.books.find_by_isbn(&form.isbn).await? {
            if existing.id != id {
                let moved = self.repository.book_instances.reassign_book(id, existing.id).await?;
                self.repository.books.delete(id).await?;
                tracing::info!(
                    "Merged book {} into {} '{}' ({} copies moved)",
                    id,
                    existing.id,
                    existing.title,
                    moved
                );
                return Ok(Updated::Merged(existing));
            }
        }

        book.title = form.title.clone();
        book.author = form.author_id().ok_or_else(|| invalid_reference("author"))?;
        book.summary = form.summary.clone();
        book.isbn = form.isbn.clone();
        book.genre = form.genre_ids();
        if !self.repository.books.replace(&book).await? {
            return Err(not_found());
        }
        tracing::info!("Updated book {} '{}'", book.id, book.title);
        Ok(Updated::Replaced(book))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Genre, InstanceStatus};

    fn form(title: &str, author: ObjectId, isbn: &str, genres: &[ObjectId]) -> BookForm {
        BookForm {
            title: title.to_string(),
            author: author.to_hex(),
            summary: "summary".to_string(),
            isbn: isbn.to_string(),
            genre: genres.iter().map(|g| g.to_hex()).collect(),
        }
    }

    fn copy_of(book: ObjectId) -> BookInstance {
        BookInstance {
            id: ObjectId::new(),
            book,
            imprint: "Penguin".to_string(),
            status: InstanceStatus::Available,
            due_back: crate::models::book_instance::today(),
        }
    }

    #[tokio::test]
    async fn test_detail_resolves_references() {
        let repository = Repository::in_memory();
        let service = BookService::new(repository.clone());
        let author = Author {
            id: ObjectId::new(),
            first_name: "Frank".to_string(),
            family_name: "Herbert".to_string(),
            date_of_birth: None,
            date_of_death: None,
        };
        repository.authors.insert(&author).await.unwrap();
        let genre = Genre::new("Science Fiction");
        repository.genres.insert(&genre).await.unwrap();

        let book = service
            .create(&form("Dune", author.id, "9780441013593", &[genre.id]))
            .await
            .unwrap()
            .into_inner();
        let copy = copy_of(book.id);
        repository.book_instances.insert(&copy).await.unwrap();

        let detail = service.detail(book.id).await.unwrap();
        assert_eq!(detail.author, Some(author));
        assert_eq!(detail.genres, vec![genre]);
        assert_eq!(detail.instances, vec![copy]);
    }

    #[tokio::test]
    async fn test_dangling_author_lists_as_none() {
        let service = BookService::new(Repository::in_memory());
        service
            .create(&form("Orphan", ObjectId::new(), "123", &[]))
            .await
            .unwrap();
        let list = service.list().await.unwrap();
        assert_eq!(list.len(), 1);
        assert!(list[0].author.is_none());
    }

    #[tokio::test]
    async fn test_create_deduplicates_by_isbn() {
        let service = BookService::new(Repository::in_memory());
        let author = ObjectId::new();
        let first = service.create(&form("Dune", author, "isbn-x", &[])).await.unwrap();
        let second = service.create(&form("Dune II", author, "ISBN-X", &[])).await.unwrap();
        assert_eq!(second, Saved::Existing(first.into_inner()));
    }

    #[tokio::test]
    async fn test_delete_blocked_by_copies() {
        let repository = Repository::in_memory();
        let service = BookService::new(repository.clone());
        let book = service
            .create(&form("Emma", ObjectId::new(), "1", &[]))
            .await
            .unwrap()
            .into_inner();
        repository.book_instances.insert(&copy_of(book.id)).await.unwrap();

        assert!(matches!(
            service.delete(book.id).await.unwrap(),
            Deletion::Blocked { .. }
        ));
        assert!(service.get(book.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_merges_copies() {
        let repository = Repository::in_memory();
        let service = BookService::new(repository.clone());
        let author = ObjectId::new();
        let keep = service.create(&form("Emma", author, "111", &[])).await.unwrap().into_inner();
        let dup = service.create(&form("Emma (dup)", author, "222", &[])).await.unwrap().into_inner();
        let copy = copy_of(dup.id);
        repository.book_instances.insert(&copy).await.unwrap();

        let outcome = service.update(dup.id, &form("Emma", author, "111", &[])).await.unwrap();
        assert_eq!(outcome, Updated::Merged(keep.clone()));
        assert!(repository.books.find(dup.id).await.unwrap().is_none());
        let moved = repository.book_instances.find(copy.id).await.unwrap().unwrap();
        assert_eq!(moved.book, keep.id);
    }
}
