//! Book collection

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, bson::oid::ObjectId, Collection, Database};

use super::case_insensitive;
use crate::{error::AppResult, models::Book};

#[async_trait]
pub trait BookStore: Send + Sync {
    /// All books ordered by title
    async fn list(&self) -> AppResult<Vec<Book>>;

    async fn find(&self, id: ObjectId) -> AppResult<Option<Book>>;

    /// Case-insensitive lookup by ISBN
    async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>>;

    /// Books written by the given author, ordered by title
    async fn by_author(&self, author: ObjectId) -> AppResult<Vec<Book>>;

    /// Books tagged with the given genre, ordered by title
    async fn by_genre(&self, genre: ObjectId) -> AppResult<Vec<Book>>;

    async fn insert(&self, book: &Book) -> AppResult<()>;

    async fn replace(&self, book: &Book) -> AppResult<bool>;

    async fn delete(&self, id: ObjectId) -> AppResult<bool>;

    async fn count(&self) -> AppResult<u64>;

    /// Point every book of `from` at author `to`; returns books changed
    async fn reassign_author(&self, from: ObjectId, to: ObjectId) -> AppResult<u64>;

    /// Swap genre `from` for `to` in every book tagged `from`, keeping the
    /// book's other genres; returns books changed
    async fn reassign_genre(&self, from: ObjectId, to: ObjectId) -> AppResult<u64>;
}

#[derive(Clone)]
pub struct MongoBooks {
    collection: Collection<Book>,
}

impl MongoBooks {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("books"),
        }
    }
}

#[async_trait]
impl BookStore for MongoBooks {
    async fn list(&self) -> AppResult<Vec<Book>> {
        let cursor = self.collection.find(doc! {}).sort(doc! { "title": 1 }).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find(&self, id: ObjectId) -> AppResult<Option<Book>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        Ok(self
            .collection
            .find_one(doc! { "isbn": isbn })
            .collation(case_insensitive())
            .await?)
    }

    async fn by_author(&self, author: ObjectId) -> AppResult<Vec<Book>> {
        let cursor = self
            .collection
            .find(doc! { "author": author })
            .sort(doc! { "title": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn by_genre(&self, genre: ObjectId) -> AppResult<Vec<Book>> {
        // matches any array element
        let cursor = self
            .collection
            .find(doc! { "genre": genre })
            .sort(doc! { "title": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert(&self, book: &Book) -> AppResult<()> {
        self.collection.insert_one(book).await?;
        Ok(())
    }

    async fn replace(&self, book: &Book) -> AppResult<bool> {
        let result = self.collection.replace_one(doc! { "_id": book.id }, book).await?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: ObjectId) -> AppResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }

    async fn reassign_author(&self, from: ObjectId, to: ObjectId) -> AppResult<u64> {
        let result = self
            .collection
            .update_many(doc! { "author": from }, doc! { "$set": { "author": to } })
            .await?;
        Ok(result.modified_count)
    }

    async fn reassign_genre(&self, from: ObjectId, to: ObjectId) -> AppResult<u64> {
        // $addToSet and $pull cannot touch the same field in one update
        self.collection
            .update_many(doc! { "genre": from }, doc! { "$addToSet": { "genre": to } })
            .await?;
        let result = self
            .collection
            .update_many(doc! { "genre": from }, doc! { "$pull": { "genre": from } })
            .await?;
        Ok(result.modified_count)
    }
}
