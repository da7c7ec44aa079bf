use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    models::month::{CreateMonthRequest, MonthResponse},
    routes::{bind, failure, ApiError},
    services::months::MonthService,
    AppState,
};

pub async fn create_month(
    State(state): State<AppState>,
    body: Result<Json<CreateMonthRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let req = bind(body)?;

    MonthService::create(state.store.as_ref(), &req)
        .await
        .map(|entry| {
            (
                StatusCode::CREATED,
                Json(json!({ "message": "Month created", "collection": entry.collection_name })),
            )
        })
        .map_err(|e| failure(e, "Failed to create month"))
}

pub async fn list_months(
    State(state): State<AppState>,
) -> Result<Json<Vec<MonthResponse>>, ApiError> {
    MonthService::list(state.store.as_ref())
        .await
        .map(|months| Json(months.into_iter().map(Into::into).collect()))
        .map_err(|e| failure(e, "Failed to fetch months"))
}
