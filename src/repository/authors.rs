//! Author collection

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, bson::oid::ObjectId, Collection, Database};

use super::case_insensitive;
use crate::{error::AppResult, models::Author};

#[async_trait]
pub trait AuthorStore: Send + Sync {
    /// All authors ordered by family name
    async fn list(&self) -> AppResult<Vec<Author>>;

    async fn find(&self, id: ObjectId) -> AppResult<Option<Author>>;

    /// Case-insensitive lookup by full name
    async fn find_by_name(&self, first_name: &str, family_name: &str) -> AppResult<Option<Author>>;

    async fn insert(&self, author: &Author) -> AppResult<()>;

    async fn replace(&self, author: &Author) -> AppResult<bool>;

    async fn delete(&self, id: ObjectId) -> AppResult<bool>;

    async fn count(&self) -> AppResult<u64>;
}

#[derive(Clone)]
pub struct MongoAuthors {
    collection: Collection<Author>,
}

impl MongoAuthors {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("authors"),
        }
    }
}

#[async_trait]
impl AuthorStore for MongoAuthors {
    async fn list(&self) -> AppResult<Vec<Author>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "family_name": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find(&self, id: ObjectId) -> AppResult<Option<Author>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn find_by_name(&self, first_name: &str, family_name: &str) -> AppResult<Option<Author>> {
        Ok(self
            .collection
            .find_one(doc! { "first_name": first_name, "family_name": family_name })
            .collation(case_insensitive())
            .await?)
    }

    async fn insert(&self, author: &Author) -> AppResult<()> {
        self.collection.insert_one(author).await?;
        Ok(())
    }

    async fn replace(&self, author: &Author) -> AppResult<bool> {
        let result = self
            .collection
            .replace_one(doc! { "_id": author.id }, author)
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: ObjectId) -> AppResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }
}
