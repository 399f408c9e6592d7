use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;

use super::{ApiError, AppState, UserCreated};
use crate::models::RegisterUserRequest;

/// `POST /users`
///
/// The response never includes the password or its hash.
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserCreated>), ApiError> {
    let Json(request) = payload?;
    let user = state.catalog().register_user(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(UserCreated {
            message: "User registered successfully",
            user,
        }),
    ))
}
