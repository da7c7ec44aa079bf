pub mod collections;
pub mod health;
pub mod months;
pub mod students;

use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderValue, Method, StatusCode, Uri},
    routing::{get, patch, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{services::ServiceError, AppState};

pub type ApiError = (StatusCode, Json<Value>);

/// Build the full application router: routes, CORS for the configured
/// client origin, and request tracing.
pub fn router(state: AppState) -> anyhow::Result<Router> {
    let origin = HeaderValue::from_str(&state.config.client_origin)?;
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
        ])
        .allow_credentials(true);

    let app = Router::new()
        .route("/", get(health::home).head(health::head))
        .route("/health", get(health::health_check))
        // Students, one collection per month
        .route("/students/migrate", post(students::migrate_month))
        .route("/students/{month}", get(students::list_students).post(students::create_student))
        .route("/students/{month}/search", get(students::search_students))
        .route("/students/{month}/{id}", put(students::update_student))
        .route("/students/{month}/{id}/payment", patch(students::update_payment))
        .route("/students/{month}/{id}/status", patch(students::deactivate_student))
        .route("/students/{month}/{id}/seat", patch(students::update_seat_number))
        // Month registry
        .route("/months", get(months::list_months).post(months::create_month))
        .route("/collections", get(collections::list_collections))
        .fallback(handler404)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    Ok(app)
}

pub async fn handler404(uri: Uri) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": format!("Invalid path: {uri}") })),
    )
}

/// Unwrap a JSON body, turning any rejection into a 400.
pub fn bind<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value).map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected request body");
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Invalid input" })),
        )
    })
}

/// Map a service error to a response. Client errors keep their message;
/// everything else is logged and reported as `context`.
pub fn failure(err: ServiceError, context: &str) -> ApiError {
    match err {
        ServiceError::BadRequest(msg) => (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))),
        other => {
            tracing::error!(error = %other, "{context}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": context })),
            )
        }
    }
}
