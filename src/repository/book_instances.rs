//! BookInstance collection

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, bson::oid::ObjectId, Collection, Database};

use crate::{
    error::AppResult,
    models::{BookInstance, InstanceStatus},
};

#[async_trait]
pub trait BookInstanceStore: Send + Sync {
    /// All copies in insertion order
    async fn list(&self) -> AppResult<Vec<BookInstance>>;

    async fn find(&self, id: ObjectId) -> AppResult<Option<BookInstance>>;

    /// Copies of the given book
    async fn by_book(&self, book: ObjectId) -> AppResult<Vec<BookInstance>>;

    async fn insert(&self, instance: &BookInstance) -> AppResult<()>;

    async fn replace(&self, instance: &BookInstance) -> AppResult<bool>;

    async fn delete(&self, id: ObjectId) -> AppResult<bool>;

    async fn count(&self) -> AppResult<u64>;

    async fn count_by_status(&self, status: InstanceStatus) -> AppResult<u64>;

    /// Point every copy of book `from` at book `to`; returns copies changed
    async fn reassign_book(&self, from: ObjectId, to: ObjectId) -> AppResult<u64>;
}

#[derive(Clone)]
pub struct MongoBookInstances {
    collection: Collection<BookInstance>,
}

impl MongoBookInstances {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("bookinstances"),
        }
    }
}

#[async_trait]
impl BookInstanceStore for MongoBookInstances {
    async fn list(&self) -> AppResult<Vec<BookInstance>> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find(&self, id: ObjectId) -> AppResult<Option<BookInstance>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn by_book(&self, book: ObjectId) -> AppResult<Vec<BookInstance>> {
        let cursor = self.collection.find(doc! { "book": book }).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert(&self, instance: &BookInstance) -> AppResult<()> {
        self.collection.insert_one(instance).await?;
        Ok(())
    }

    async fn replace(&self, instance: &BookInstance) -> AppResult<bool> {
        let result = self
            .collection
            .replace_one(doc! { "_id": instance.id }, instance)
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

    async fn count_by_status(&self, status: InstanceStatus) -> AppResult<u64> {
        Ok(self
            .collection
            .count_documents(doc! { "status": status.as_str() })
            .await?)
    }

    async fn reassign_book(&self, from: ObjectId, to: ObjectId) -> AppResult<u64> {
        let result = self
            .collection
            .update_many(doc! { "book": from }, doc! { "$set": { "book": to } })
            .await?;
        Ok(result.modified_count)
    }
}
