use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::{
    services::{with_timeout, METADATA_TIMEOUT},
    AppState,
};

pub async fn home() -> &'static str {
    "Hello, World!"
}

pub async fn head() -> StatusCode {
    StatusCode::OK
}

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match with_timeout(METADATA_TIMEOUT, state.store.ping()).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "db": "connected" })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "health check ping failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "error", "db": "unavailable" })),
            )
        }
    }
}
