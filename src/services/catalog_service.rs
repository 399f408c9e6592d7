//! Domain service for the movie catalog.
//!
//! Every operation validates its input before touching the store, so a
//! rejected request never leaves a partial write behind.

use crate::api::types::{FavoriteDto, GenreDto, MovieDto, ReviewDto, UserDto};
use crate::domain::{MovieId, Page};
use crate::models::{
    AddFavoriteRequest, AddGenreRequest, AddMovieRequest, AddReviewRequest, RegisterUserRequest,
};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Errors raised by catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// The genre named by an add-movie request does not exist.
    #[error("Genre '{0}' does not exist")]
    UnknownGenre(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl CatalogError {
    #[must_use]
    pub fn movie_not_found(id: MovieId) -> Self {
        Self::NotFound(format!("Movie {id} not found"))
    }
}

impl From<DbErr> for CatalogError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                Self::Duplicate(format!("Duplicate value violates a unique constraint: {detail}"))
            }
            _ => Self::Store(err.to_string()),
        }
    }
}

impl From<anyhow::Error> for CatalogError {
    fn from(err: anyhow::Error) -> Self {
        Self::Store(err.to_string())
    }
}

/// Domain service trait for the catalog.
///
/// Handlers depend on this trait rather than on the store, so the store
/// handle is injected once at construction.
#[async_trait::async_trait]
pub trait CatalogService: Send + Sync {
    /// Adds a genre unless one with the same name (ignoring case) exists.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Validation`] if the name is missing or blank
    /// - [`CatalogError::Duplicate`] if the name is already taken
    async fn add_genre(&self, request: AddGenreRequest) -> Result<GenreDto, CatalogError>;

    /// Lists all genres by id.
    async fn list_genres(&self) -> Result<Vec<GenreDto>, CatalogError>;

    /// Adds a movie to an existing genre, looked up by exact name.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Validation`] if name, year or genre is missing
    /// - [`CatalogError::UnknownGenre`] if no genre has that name
    async fn add_movie(&self, request: AddMovieRequest) -> Result<MovieDto, CatalogError>;

    /// One page of movies joined to their genre, ordered by id.
    async fn list_movies(&self, page: Page) -> Result<Vec<MovieDto>, CatalogError>;

    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no movie has this id.
    async fn get_movie(&self, id: MovieId) -> Result<MovieDto, CatalogError>;

    /// Deletes a movie and returns it as it was.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if nothing was deleted.
    async fn delete_movie(&self, id: MovieId) -> Result<MovieDto, CatalogError>;

    /// Case-insensitive substring search on movie names. Not paginated.
    async fn search_movies(&self, keyword: Option<String>) -> Result<Vec<MovieDto>, CatalogError>;

    /// Registers a user, storing only a salted hash of the password.
    async fn register_user(&self, request: RegisterUserRequest) -> Result<UserDto, CatalogError>;

    /// Adds a review. The username and movie are not checked beforehand.
    async fn add_review(&self, request: AddReviewRequest) -> Result<ReviewDto, CatalogError>;

    /// Marks a movie as a user's favorite. No existence checks.
    async fn add_favorite(&self, request: AddFavoriteRequest) -> Result<FavoriteDto, CatalogError>;

    /// Movies the user has marked as favorite.
    async fn list_favorites(&self, username: &str) -> Result<Vec<MovieDto>, CatalogError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_error_display() {
        let err = CatalogError::movie_not_found(MovieId::new(42));
        assert_eq!(err.to_string(), "Movie 42 not found");

        let err = CatalogError::UnknownGenre("Western".to_string());
        assert_eq!(err.to_string(), "Genre 'Western' does not exist");
    }

    #[test]
    fn generic_db_errors_become_store_errors() {
        let err: CatalogError = DbErr::Custom("connection reset".to_string()).into();
        assert!(matches!(err, CatalogError::Store(_)));
    }
}
