use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use futures_util::TryStreamExt;
use mongodb::{Client, Collection, Database};

use super::{Store, StoreResult};
use crate::models::{
    month::{MonthEntry, MONTHS_COLLECTION},
    student::{Student, StudentFilter, StudentUpdate},
};

/// Connect to MongoDB and verify the server answers before serving traffic.
pub async fn connect(uri: &str, database: &str) -> anyhow::Result<MongoStore> {
    let client = Client::with_uri_str(uri).await?;
    let store = MongoStore::new(client.database(database));
    store.ping().await?;
    Ok(store)
}

#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn months(&self) -> Collection<MonthEntry> {
        self.db.collection(MONTHS_COLLECTION)
    }
}

/// Query document for a student filter. Search terms are escaped so they
/// match literally.
pub fn filter_document(filter: &StudentFilter) -> Document {
    match filter {
        StudentFilter::All => doc! {},
        StudentFilter::Search(q) => {
            let pattern = regex::escape(q);
            doc! {
                "$or": [
                    { "name": { "$regex": pattern.as_str(), "$options": "i" } },
                    { "phone": { "$regex": pattern.as_str(), "$options": "i" } },
                    { "aadhaar": { "$regex": pattern.as_str(), "$options": "i" } },
                ]
            }
        }
    }
}

#[async_trait]
impl Store for MongoStore {
    async fn insert_student(&self, collection: &str, student: &Student) -> StoreResult<()> {
        self.collection::<Student>(collection)
            .insert_one(student)
            .await?;
        Ok(())
    }

    async fn find_students(
        &self,
        collection: &str,
        filter: &StudentFilter,
    ) -> StoreResult<Vec<Student>> {
        let students = self
            .collection::<Student>(collection)
            .find(filter_document(filter))
            .await?
            .try_collect()
            .await?;
        Ok(students)
    }

    async fn find_documents(&self, collection: &str) -> StoreResult<Vec<Document>> {
        let docs = self
            .collection::<Document>(collection)
            .find(doc! {})
            .await?
            .try_collect()
            .await?;
        Ok(docs)
    }

    async fn insert_students(&self, collection: &str, students: &[Student]) -> StoreResult<usize> {
        if students.is_empty() {
            return Ok(0);
        }
        let result = self
            .collection::<Student>(collection)
            .insert_many(students)
            .await?;
        Ok(result.inserted_ids.len())
    }

    async fn update_student(
        &self,
        collection: &str,
        id: ObjectId,
        update: &StudentUpdate,
    ) -> StoreResult<u64> {
        let result = self
            .collection::<Document>(collection)
            .update_one(doc! { "_id": id }, doc! { "$set": update.set_document() })
            .await?;
        Ok(result.matched_count)
    }

    async fn insert_month(&self, entry: &MonthEntry) -> StoreResult<()> {
        self.months().insert_one(entry).await?;
        Ok(())
    }

    async fn list_months(&self) -> StoreResult<Vec<MonthEntry>> {
        let months = self.months().find(doc! {}).await?.try_collect().await?;
        Ok(months)
    }

    async fn list_collections(&self) -> StoreResult<Vec<String>> {
        Ok(self.db.list_collection_names().await?)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
