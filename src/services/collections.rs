use crate::{
    db::Store,
    models::month::MONTHS_COLLECTION,
    services::{with_timeout, ServiceError, METADATA_TIMEOUT},
};

pub struct CollectionService;

impl CollectionService {
    pub async fn list(store: &dyn Store) -> Result<Vec<String>, ServiceError> {
        with_timeout(METADATA_TIMEOUT, store.list_collections()).await
    }
}

/// Any month string routes to a collection of that name, except names
/// MongoDB cannot hold and the registry collection itself.
pub fn ensure_student_collection(name: &str) -> Result<(), ServiceError> {
    let reason = if name.is_empty() {
        Some("month is required")
    } else if name.contains('$') || name.contains('\0') {
        Some("month contains invalid characters")
    } else if name.starts_with("system.") {
        Some("month uses a reserved prefix")
    } else if name == MONTHS_COLLECTION {
        Some("month names the registry collection")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(ServiceError::BadRequest(reason.to_string())),
        None => Ok(()),
    }
}
