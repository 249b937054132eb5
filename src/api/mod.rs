//! REST API endpoints.
//!
//! Axum-based HTTP API for recording matches and querying archetypes
//! and derived statistics.

pub mod routes;
pub mod state;

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::storage::StorageError;
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::MatchNotFound(id) => ApiError::NotFound(format!("match {}", id)),
            StorageError::ArchetypeNotFound(id) => {
                ApiError::NotFound(format!("archetype {}", id))
            }
            StorageError::DuplicateArchetype(id) => {
                ApiError::Conflict(format!("archetype {} already exists", id))
            }
            StorageError::DefaultArchetype(id) => {
                ApiError::Conflict(format!("archetype {} is a default entry", id))
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/archetypes",
            get(routes::archetypes::list).post(routes::archetypes::create),
        )
        .route(
            "/api/archetypes/:id",
            axum::routing::delete(routes::archetypes::remove),
        )
        .route(
            "/api/users/:user/matches",
            get(routes::matches::list).post(routes::matches::create),
        )
        .route(
            "/api/users/:user/matches/:id",
            put(routes::matches::replace).delete(routes::matches::remove),
        )
        .route("/api/users/:user/stats/overview", get(routes::stats::overview))
        .route(
            "/api/users/:user/stats/archetypes",
            get(routes::stats::archetype_split),
        )
        .route(
            "/api/users/:user/stats/classes",
            get(routes::stats::class_split),
        )
        .route(
            "/api/users/:user/stats/matchups",
            get(routes::stats::matchups),
        )
        .route("/api/stats/rankings", get(routes::rankings::rankings))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS layer for the configured origin. `*` (or an unparseable value)
/// allows any origin.
pub fn cors_layer(origin: &str) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origin == "*" {
        return base.allow_origin(Any);
    }
    match origin.parse::<HeaderValue>() {
        Ok(value) => base.allow_origin(value),
        Err(_) => base.allow_origin(Any),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_status_codes() {
        let not_found = ApiError::NotFound("x".to_string()).into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let bad = ApiError::BadRequest("x".to_string()).into_response();
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

        let conflict = ApiError::Conflict("x".to_string()).into_response();
        assert_eq!(conflict.status(), StatusCode::CONFLICT);

        let internal = ApiError::Internal("x".to_string()).into_response();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_cors_layer_accepts_any_origin_shape() {
        // Exact origin, wildcard, and junk all produce a usable layer.
        let _ = cors_layer("http://localhost:5173");
        let _ = cors_layer("*");
        let _ = cors_layer("not\na\nheader");
    }

    #[test]
    fn test_storage_error_mapping() {
        let err: ApiError = StorageError::ArchetypeNotFound("x".to_string()).into();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err: ApiError = StorageError::DefaultArchetype("unknown".to_string()).into();
        assert!(matches!(err, ApiError::Conflict(_)));
    }
}
