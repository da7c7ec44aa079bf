use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    models::{
        migration::{MigrateRequest, MigrationReport},
        student::{
            PaymentRequest, SearchQuery, SeatRequest, StudentPayload, StudentResponse,
            StudentUpdate,
        },
    },
    routes::{bind, failure, ApiError},
    services::{migration::MigrationService, students::StudentService},
    AppState,
};

pub async fn create_student(
    State(state): State<AppState>,
    Path(month): Path<String>,
    body: Result<Json<StudentPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<StudentResponse>), ApiError> {
    let payload = bind(body)?;

    StudentService::create(state.store.as_ref(), &month, payload)
        .await
        .map(|student| (StatusCode::CREATED, Json(student.into())))
        .map_err(|e| failure(e, "Failed to insert student"))
}

pub async fn list_students(
    State(state): State<AppState>,
    Path(month): Path<String>,
) -> Result<Json<Vec<StudentResponse>>, ApiError> {
    StudentService::list(state.store.as_ref(), &month)
        .await
        .map(|students| Json(students.into_iter().map(Into::into).collect()))
        .map_err(|e| failure(e, "Failed to fetch students"))
}

pub async fn search_students(
    State(state): State<AppState>,
    Path(month): Path<String>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<StudentResponse>>, ApiError> {
    StudentService::search(state.store.as_ref(), &month, &query.q)
        .await
        .map(|students| Json(students.into_iter().map(Into::into).collect()))
        .map_err(|e| failure(e, "Search failed"))
}

pub async fn update_student(
    State(state): State<AppState>,
    Path((month, id)): Path<(String, String)>,
    body: Result<Json<StudentPayload>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let payload = bind(body)?;

    StudentService::update(state.store.as_ref(), &month, &id, StudentUpdate::Replace(payload))
        .await
        .map(|_| Json(json!({ "message": "Student updated" })))
        .map_err(|e| failure(e, "Update failed"))
}

pub async fn update_payment(
    State(state): State<AppState>,
    Path((month, id)): Path<(String, String)>,
    body: Result<Json<PaymentRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let req = bind(body)?;

    StudentService::update(state.store.as_ref(), &month, &id, StudentUpdate::AmountPaid(req.amount_paid))
        .await
        .map(|_| Json(json!({ "message": "Payment status updated" })))
        .map_err(|e| failure(e, "Payment update failed"))
}

pub async fn update_seat_number(
    State(state): State<AppState>,
    Path((month, id)): Path<(String, String)>,
    body: Result<Json<SeatRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let req = bind(body)?;

    StudentService::update(state.store.as_ref(), &month, &id, StudentUpdate::SeatNumber(req.seat_number))
        .await
        .map(|_| Json(json!({ "message": "Seat number updated" })))
        .map_err(|e| failure(e, "Seat number update failed"))
}

/// Always deactivates; there is no route to reactivate a student.
pub async fn deactivate_student(
    State(state): State<AppState>,
    Path((month, id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    StudentService::update(state.store.as_ref(), &month, &id, StudentUpdate::Deactivate)
        .await
        .map(|_| Json(json!({ "message": "Status updated" })))
        .map_err(|e| failure(e, "Status update failed"))
}

pub async fn migrate_month(
    State(state): State<AppState>,
    body: Result<Json<MigrateRequest>, JsonRejection>,
) -> Result<Json<MigrationReport>, ApiError> {
    let req = bind(body)?;

    MigrationService::migrate(state.store.as_ref(), &req)
        .await
        .map(Json)
        .map_err(|e| failure(e, "Migration failed"))
}
