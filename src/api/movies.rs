use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, AppState, MovieDto, MovieMessage};
use crate::api::validation::{validate_movie_id, validate_page};
use crate::models::AddMovieRequest;

#[derive(Debug, Deserialize)]
pub struct ListMoviesQuery {
    pub page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchMoviesQuery {
    pub keyword: Option<String>,
}

/// `POST /movies`
///
/// The genre is named, not referenced by id, and must match an existing
/// genre exactly.
pub async fn add_movie(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AddMovieRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MovieMessage>), ApiError> {
    let Json(request) = payload?;
    let movie = state.catalog().add_movie(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(MovieMessage {
            message: "Movie added successfully",
            movie,
        }),
    ))
}

/// `GET /movies?page=N`
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListMoviesQuery>, QueryRejection>,
) -> Result<Json<Vec<MovieDto>>, ApiError> {
    let Query(query) = query?;
    let page = validate_page(query.page.as_deref())?;
    let movies = state.catalog().list_movies(page).await?;
    Ok(Json(movies))
}

pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MovieDto>, ApiError> {
    let id = validate_movie_id(&id)?;
    let movie = state.catalog().get_movie(id).await?;
    Ok(Json(movie))
}

pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MovieMessage>, ApiError> {
    let id = validate_movie_id(&id)?;
    let movie = state.catalog().delete_movie(id).await?;

    Ok(Json(MovieMessage {
        message: "Movie deleted successfully",
        movie,
    }))
}

/// `GET /movies/search?keyword=...`
pub async fn search_movies(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SearchMoviesQuery>, QueryRejection>,
) -> Result<Json<Vec<MovieDto>>, ApiError> {
    let Query(query) = query?;
    let movies = state.catalog().search_movies(query.keyword).await?;
    Ok(Json(movies))
}
