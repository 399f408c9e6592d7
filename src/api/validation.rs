use super::ApiError;
use crate::domain::{MovieId, Page};

pub fn validate_movie_id(raw: &str) -> Result<MovieId, ApiError> {
    MovieId::parse(raw).ok_or_else(|| {
        ApiError::validation(format!(
            "Invalid movie ID: {}. ID must be a positive integer",
            raw
        ))
    })
}

pub fn validate_page(raw: Option<&str>) -> Result<Page, ApiError> {
    Page::from_query(raw).ok_or_else(|| {
        ApiError::validation(format!(
            "Invalid page: {}. Page must be a positive integer",
            raw.unwrap_or_default()
        ))
    })
}

pub fn validate_username(username: &str) -> Result<&str, ApiError> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Username cannot be empty"));
    }
    Ok(trimmed)
}
