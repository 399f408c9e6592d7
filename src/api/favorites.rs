use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;

use super::{ApiError, AppState, FavoriteCreated, MovieDto};
use crate::api::validation::validate_username;
use crate::models::AddFavoriteRequest;

/// `POST /favorites`
pub async fn add_favorite(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AddFavoriteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<FavoriteCreated>), ApiError> {
    let Json(request) = payload?;
    let favorite = state.catalog().add_favorite(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(FavoriteCreated {
            message: "Favorite added successfully",
            favorite,
        }),
    ))
}

/// `GET /favorites/{username}`
pub async fn list_favorites(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Json<Vec<MovieDto>>, ApiError> {
    let username = validate_username(&username)?;
    let movies = state.catalog().list_favorites(username).await?;
    Ok(Json(movies))
}
