//! Request payloads for the catalog operations and their validated forms.
//!
//! Every field arrives optional so that an absent value becomes a
//! [`CatalogError::Validation`] rather than a body-parsing rejection. The
//! `validate` methods turn a payload into a `New*` value whose fields are
//! guaranteed present.

use serde::Deserialize;

use crate::domain::MovieId;
use crate::services::CatalogError;

/// A JSON value that should hold an integer: either a number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum IntegerLike {
    Number(i64),
    Text(String),
    Other(serde_json::Value),
}

impl IntegerLike {
    #[must_use]
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Number(n) => i32::try_from(*n).ok(),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Other(_) => None,
        }
    }
}

impl From<i64> for IntegerLike {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

fn required_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required_integer(
    field: &str,
    value: Option<&IntegerLike>,
    missing: &str,
) -> Result<i32, CatalogError> {
    let value = value.ok_or_else(|| CatalogError::Validation(missing.to_string()))?;
    value
        .as_i32()
        .ok_or_else(|| CatalogError::Validation(format!("{field} must be an integer")))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddGenreRequest {
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGenre {
    pub name: String,
}

impl AddGenreRequest {
    pub fn validate(self) -> Result<NewGenre, CatalogError> {
        let name = required_text(self.name)
            .ok_or_else(|| CatalogError::Validation("Genre name is required".to_string()))?;
        Ok(NewGenre { name })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddMovieRequest {
    pub name: Option<String>,
    pub year: Option<IntegerLike>,
    /// Genre name, resolved to an id by exact match.
    pub genre: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovie {
    pub name: String,
    pub year: i32,
    pub genre: String,
}

impl AddMovieRequest {
    pub fn validate(self) -> Result<NewMovie, CatalogError> {
        const MISSING: &str = "Name, year, and genre are required";

        let name = required_text(self.name);
        let genre = required_text(self.genre);
        let (Some(name), Some(genre)) = (name, genre) else {
            return Err(CatalogError::Validation(MISSING.to_string()));
        };
        let year = required_integer("year", self.year.as_ref(), MISSING)?;

        Ok(NewMovie { name, year, genre })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    pub name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub year_of_birth: Option<IntegerLike>,
}

#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub password: String,
    pub year_of_birth: i32,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("year_of_birth", &self.year_of_birth)
            .finish()
    }
}

impl RegisterUserRequest {
    pub fn validate(self) -> Result<NewUser, CatalogError> {
        const MISSING: &str = "Name, username, password, and yearOfBirth are required";

        let name = required_text(self.name);
        let username = required_text(self.username);
        // Passwords are kept verbatim; only emptiness is rejected.
        let password = self.password.filter(|p| !p.is_empty());
        let (Some(name), Some(username), Some(password)) = (name, username, password) else {
            return Err(CatalogError::Validation(MISSING.to_string()));
        };
        let year_of_birth = required_integer("yearOfBirth", self.year_of_birth.as_ref(), MISSING)?;

        Ok(NewUser {
            name,
            username,
            password,
            year_of_birth,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddReviewRequest {
    pub username: Option<String>,
    pub stars: Option<IntegerLike>,
    pub review_text: Option<String>,
    pub movie_id: Option<IntegerLike>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub username: String,
    pub stars: i32,
    pub review_text: String,
    pub movie_id: MovieId,
}

impl AddReviewRequest {
    pub fn validate(self) -> Result<NewReview, CatalogError> {
        const MISSING: &str = "Username, stars, reviewText, and movieId are required";

        let username = required_text(self.username);
        let review_text = required_text(self.review_text);
        let (Some(username), Some(review_text)) = (username, review_text) else {
            return Err(CatalogError::Validation(MISSING.to_string()));
        };
        let stars = required_integer("stars", self.stars.as_ref(), MISSING)?;
        let movie_id = required_integer("movieId", self.movie_id.as_ref(), MISSING)?;

        Ok(NewReview {
            username,
            stars,
            review_text,
            movie_id: MovieId::new(movie_id),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFavoriteRequest {
    pub username: Option<String>,
    pub movie_id: Option<IntegerLike>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFavorite {
    pub username: String,
    pub movie_id: MovieId,
}

impl AddFavoriteRequest {
    pub fn validate(self) -> Result<NewFavorite, CatalogError> {
        const MISSING: &str = "Username and movieId are required";

        let username = required_text(self.username)
            .ok_or_else(|| CatalogError::Validation(MISSING.to_string()))?;
        let movie_id = required_integer("movieId", self.movie_id.as_ref(), MISSING)?;

        Ok(NewFavorite {
            username,
            movie_id: MovieId::new(movie_id),
        })
    }
}
