//! In-process document store
//!
//! Keeps every collection in insertion order behind a single async lock.
//! Lookups on natural keys mirror the case-insensitive collation used
//! against MongoDB.

use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::{AuthorStore, BookInstanceStore, BookStore, GenreStore};
use crate::{
    error::AppResult,
    models::{Author, Book, BookInstance, Genre, InstanceStatus},
};

#[derive(Default)]
struct Collections {
    authors: IndexMap<ObjectId, Author>,
    genres: IndexMap<ObjectId, Genre>,
    books: IndexMap<ObjectId, Book>,
    book_instances: IndexMap<ObjectId, BookInstance>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
}

fn same_key(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn sorted_by<T, K: Ord>(mut items: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    items.sort_by_key(|item| key(item));
    items
}

#[async_trait]
impl GenreStore for MemoryStore {
    async fn list(&self) -> AppResult<Vec<Genre>> {
        let db = self.inner.read().await;
        Ok(sorted_by(db.genres.values().cloned().collect(), |g| g.name.clone()))
    }

    async fn find(&self, id: ObjectId) -> AppResult<Option<Genre>> {
        Ok(self.inner.read().await.genres.get(&id).cloned())
    }

    async fn find_many(&self, ids: &[ObjectId]) -> AppResult<Vec<Genre>> {
        let db = self.inner.read().await;
        let found = ids.iter().filter_map(|id| db.genres.get(id).cloned()).collect();
        Ok(sorted_by(found, |g| g.name.clone()))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let db = self.inner.read().await;
        Ok(db.genres.values().find(|g| same_key(&g.name, name)).cloned())
    }

    async fn insert(&self, genre: &Genre) -> AppResult<()> {
        self.inner.write().await.genres.insert(genre.id, genre.clone());
        Ok(())
    }

    async fn replace(&self, genre: &Genre) -> AppResult<bool> {
        let mut db = self.inner.write().await;
        match db.genres.get_mut(&genre.id) {
            Some(stored) => {
                *stored = genre.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ObjectId) -> AppResult<bool> {
        Ok(self.inner.write().await.genres.shift_remove(&id).is_some())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.inner.read().await.genres.len() as u64)
    }
}

#[async_trait]
impl AuthorStore for MemoryStore {
    async fn list(&self) -> AppResult<Vec<Author>> {
        let db = self.inner.read().await;
        Ok(sorted_by(db.authors.values().cloned().collect(), |a| a.family_name.clone()))
    }

    async fn find(&self, id: ObjectId) -> AppResult<Option<Author>> {
        Ok(self.inner.read().await.authors.get(&id).cloned())
    }

    async fn find_by_name(&self, first_name: &str, family_name: &str) -> AppResult<Option<Author>> {
        let db = self.inner.read().await;
        Ok(db
            .authors
            .values()
            .find(|a| same_key(&a.first_name, first_name) && same_key(&a.family_name, family_name))
            .cloned())
    }

    async fn insert(&self, author: &Author) -> AppResult<()> {
        self.inner.write().await.authors.insert(author.id, author.clone());
        Ok(())
    }

    async fn replace(&self, author: &Author) -> AppResult<bool> {
        let mut db = self.inner.write().await;
        match db.authors.get_mut(&author.id) {
            Some(stored) => {
                *stored = author.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ObjectId) -> AppResult<bool> {
        Ok(self.inner.write().await.authors.shift_remove(&id).is_some())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.inner.read().await.authors.len() as u64)
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn list(&self) -> AppResult<Vec<Book>> {
        let db = self.inner.read().await;
        Ok(sorted_by(db.books.values().cloned().collect(), |b| b.title.clone()))
    }

    async fn find(&self, id: ObjectId) -> AppResult<Option<Book>> {
        Ok(self.inner.read().await.books.get(&id).cloned())
    }

    async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        let db = self.inner.read().await;
        Ok(db.books.values().find(|b| same_key(&b.isbn, isbn)).cloned())
    }

    async fn by_author(&self, author: ObjectId) -> AppResult<Vec<Book>> {
        let db = self.inner.read().await;
        let found = db.books.values().filter(|b| b.author == author).cloned().collect();
        Ok(sorted_by(found, |b| b.title.clone()))
    }

    async fn by_genre(&self, genre: ObjectId) -> AppResult<Vec<Book>> {
        let db = self.inner.read().await;
        let found = db.books.values().filter(|b| b.has_genre(&genre)).cloned().collect();
        Ok(sorted_by(found, |b| b.title.clone()))
    }

    async fn insert(&self, book: &Book) -> AppResult<()> {
        self.inner.write().await.books.insert(book.id, book.clone());
        Ok(())
    }

    async fn replace(&self, book: &Book) -> AppResult<bool> {
        let mut db = self.inner.write().await;
        match db.books.get_mut(&book.id) {
            Some(stored) => {
                *stored = book.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ObjectId) -> AppResult<bool> {
        Ok(self.inner.write().await.books.shift_remove(&id).is_some())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.inner.read().await.books.len() as u64)
    }

    async fn reassign_author(&self, from: ObjectId, to: ObjectId) -> AppResult<u64> {
        let mut db = self.inner.write().await;
        let mut changed = 0;
        for book in db.books.values_mut().filter(|b| b.author == from) {
            book.author = to;
            changed += 1;
        }
        Ok(changed)
    }

    async fn reassign_genre(&self, from: ObjectId, to: ObjectId) -> AppResult<u64> {
        let mut db = self.inner.write().await;
        let mut changed = 0;
        for book in db.books.values_mut().filter(|b| b.has_genre(&from)) {
            book.genre.retain(|g| *g != from);
            if !book.genre.contains(&to) {
                book.genre.push(to);
            }
            changed += 1;
        }
        Ok(changed)
    }
}

#[async_trait]
impl BookInstanceStore for MemoryStore {
    async fn list(&self) -> AppResult<Vec<BookInstance>> {
        Ok(self.inner.read().await.book_instances.values().cloned().collect())
    }

    async fn find(&self, id: ObjectId) -> AppResult<Option<BookInstance>> {
        Ok(self.inner.read().await.book_instances.get(&id).cloned())
    }

    async fn by_book(&self, book: ObjectId) -> AppResult<Vec<BookInstance>> {
        let db = self.inner.read().await;
        Ok(db
            .book_instances
            .values()
            .filter(|i| i.book == book)
            .cloned()
            .collect())
    }

    async fn insert(&self, instance: &BookInstance) -> AppResult<()> {
        self.inner
            .write()
            .await
            .book_instances
            .insert(instance.id, instance.clone());
        Ok(())
    }

    async fn replace(&self, instance: &BookInstance) -> AppResult<bool> {
        let mut db = self.inner.write().await;
        match db.book_instances.get_mut(&instance.id) {
            Some(stored) => {
                *stored = instance.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ObjectId) -> AppResult<bool> {
        Ok(self.inner.write().await.book_instances.shift_remove(&id).is_some())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.inner.read().await.book_instances.len() as u64)
    }

    async fn count_by_status(&self, status: InstanceStatus) -> AppResult<u64> {
        let db = self.inner.read().await;
        Ok(db.book_instances.values().filter(|i| i.status == status).count() as u64)
    }

    async fn reassign_book(&self, from: ObjectId, to: ObjectId) -> AppResult<u64> {
        let mut db = self.inner.write().await;
        let mut changed = 0;
        for instance in db.book_instances.values_mut().filter(|i| i.book == from) {
            instance.book = to;
            changed += 1;
        }
        Ok(changed)
    }
}
