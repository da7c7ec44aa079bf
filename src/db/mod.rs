pub mod mongo;

use async_trait::async_trait;
use bson::{oid::ObjectId, Document};

use crate::models::{
    month::MonthEntry,
    student::{Student, StudentFilter, StudentUpdate},
};

pub use mongo::{connect, MongoStore};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("mongodb: {0}")]
    Mongo(#[from] mongodb::error::Error),
    #[error("bson encode: {0}")]
    Encode(#[from] bson::ser::Error),
    #[error("bson decode: {0}")]
    Decode(#[from] bson::de::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Document store holding one collection per month plus the month registry.
///
/// Collection names are passed through as given; callers decide which
/// names are acceptable.
#[async_trait]
pub trait Store: Send + Sync + 'static {
    async fn insert_student(&self, collection: &str, student: &Student) -> StoreResult<()>;

    async fn find_students(
        &self,
        collection: &str,
        filter: &StudentFilter,
    ) -> StoreResult<Vec<Student>>;

    /// Every document of a collection, undecoded.
    async fn find_documents(&self, collection: &str) -> StoreResult<Vec<Document>>;

    /// Returns how many documents were inserted. An empty slice is a no-op.
    async fn insert_students(&self, collection: &str, students: &[Student]) -> StoreResult<usize>;

    /// Returns the number of matched documents.
    async fn update_student(
        &self,
        collection: &str,
        id: ObjectId,
        update: &StudentUpdate,
    ) -> StoreResult<u64>;

    async fn insert_month(&self, entry: &MonthEntry) -> StoreResult<()>;

    async fn list_months(&self) -> StoreResult<Vec<MonthEntry>>;

    async fn list_collections(&self) -> StoreResult<Vec<String>>;

    async fn ping(&self) -> StoreResult<()>;
}
