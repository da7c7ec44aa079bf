use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{
    routes::{failure, ApiError},
    services::collections::CollectionService,
    AppState,
};

pub async fn list_collections(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    CollectionService::list(state.store.as_ref())
        .await
        .map(|names| Json(json!({ "collections": names })))
        .map_err(|e| failure(e, "Failed to list collections"))
}
