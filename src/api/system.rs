//! Service-level endpoints: welcome text, health and metrics.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use super::{AppState, HealthDto};

/// `GET /`
pub async fn index() -> &'static str {
    "Welcome to the Movie Service!"
}

/// `GET /health`
///
/// Succeeds only when the store answers a trivial query.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store().ping().await {
        Ok(()) => (StatusCode::OK, Json(HealthDto { status: "ok" })),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthDto {
                    status: "unavailable",
                }),
            )
        }
    }
}
