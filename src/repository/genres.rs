//! Genre collection

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, bson::oid::ObjectId, Collection, Database};

use super::case_insensitive;
use crate::{error::AppResult, models::Genre};

#[async_trait]
pub trait GenreStore: Send + Sync {
    /// All genres ordered by name
    async fn list(&self) -> AppResult<Vec<Genre>>;

    async fn find(&self, id: ObjectId) -> AppResult<Option<Genre>>;

    /// Genres with any of the given ids, ordered by name
    async fn find_many(&self, ids: &[ObjectId]) -> AppResult<Vec<Genre>>;

    /// Case-insensitive lookup by name
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Genre>>;

    async fn insert(&self, genre: &Genre) -> AppResult<()>;

    /// Replace the stored genre with the same id; false if it is gone
    async fn replace(&self, genre: &Genre) -> AppResult<bool>;

    async fn delete(&self, id: ObjectId) -> AppResult<bool>;

    async fn count(&self) -> AppResult<u64>;
}

#[derive(Clone)]
pub struct MongoGenres {
    collection: Collection<Genre>,
}

impl MongoGenres {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("genres"),
        }
    }
}

#[async_trait]
impl GenreStore for MongoGenres {
    async fn list(&self) -> AppResult<Vec<Genre>> {
        let cursor = self.collection.find(doc! {}).sort(doc! { "name": 1 }).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find(&self, id: ObjectId) -> AppResult<Option<Genre>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn find_many(&self, ids: &[ObjectId]) -> AppResult<Vec<Genre>> {
        let cursor = self
            .collection
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .sort(doc! { "name": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        Ok(self
            .collection
            .find_one(doc! { "name": name })
            .collation(case_insensitive())
            .await?)
    }

    async fn insert(&self, genre: &Genre) -> AppResult<()> {
        self.collection.insert_one(genre).await?;
        Ok(())
    }

    async fn replace(&self, genre: &Genre) -> AppResult<bool> {
        let result = self
            .collection
            .replace_one(doc! { "_id": genre.id }, genre)
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
