use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;

use super::{ApiError, AppState, GenreCreated, GenreDto};
use crate::models::AddGenreRequest;

/// `POST /genres`
pub async fn add_genre(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AddGenreRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<GenreCreated>), ApiError> {
    let Json(request) = payload?;
    let genre = state.catalog().add_genre(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(GenreCreated {
            message: "Genre added successfully",
            genre,
        }),
    ))
}

/// `GET /genres`
pub async fn list_genres(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<GenreDto>>, ApiError> {
    let genres = state.catalog().list_genres().await?;
    Ok(Json(genres))
}
