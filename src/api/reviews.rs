use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;

use super::{ApiError, AppState, ReviewCreated};
use crate::models::AddReviewRequest;

pub async fn add_review(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AddReviewRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ReviewCreated>), ApiError> {
    let Json(request) = payload?;
    let review = state.catalog().add_review(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(ReviewCreated {
            message: "Review added successfully",
            review,
        }),
    ))
}
