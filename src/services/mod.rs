pub mod collections;
pub mod migration;
pub mod months;
pub mod students;

use std::{future::Future, time::Duration};

use validator::Validate;

use crate::db::StoreError;

/// Deadline for student reads, writes and migrations.
pub const STUDENT_TIMEOUT: Duration = Duration::from_secs(10);
/// Deadline for month registry and collection metadata calls.
pub const METADATA_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("store call timed out after {0:?}")]
    Timeout(Duration),
}

/// Run a store call, abandoning it once `limit` elapses.
pub async fn with_timeout<T, F>(limit: Duration, call: F) -> Result<T, ServiceError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result.map_err(ServiceError::from),
        Err(_) => Err(ServiceError::Timeout(limit)),
    }
}

pub fn validate<T: Validate>(value: &T) -> Result<(), ServiceError> {
    value
        .validate()
        .map_err(|e| ServiceError::BadRequest(e.to_string()))
}
