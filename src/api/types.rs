use serde::Serialize;

use crate::db::{MovieWithGenre, User};
use crate::entities::{favorite, genre, review};

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreDto {
    pub id: i32,
    pub name: String,
}

impl From<genre::Model> for GenreDto {
    fn from(model: genre::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

/// A movie together with its genre's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDto {
    pub id: i32,
    pub name: String,
    pub year: i32,
    pub genre_id: i32,
    pub genre: String,
}

impl From<MovieWithGenre> for MovieDto {
    fn from(row: MovieWithGenre) -> Self {
        Self {
            id: row.id,
            name: row.name,
            year: row.year,
            genre_id: row.genre_id,
            genre: row.genre,
        }
    }
}

/// Public view of a registered user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub year_of_birth: i32,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            username: user.username,
            year_of_birth: user.year_of_birth,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    pub id: i32,
    pub username: String,
    pub stars: i32,
    pub review_text: String,
    pub movie_id: i32,
}

impl From<review::Model> for ReviewDto {
    fn from(model: review::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            stars: model.stars,
            review_text: model.review_text,
            movie_id: model.movie_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteDto {
    pub id: i32,
    pub username: String,
    pub movie_id: i32,
}

impl From<favorite::Model> for FavoriteDto {
    fn from(model: favorite::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            movie_id: model.movie_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GenreCreated {
    pub message: &'static str,
    pub genre: GenreDto,
}

#[derive(Debug, Serialize)]
pub struct MovieMessage {
    pub message: &'static str,
    pub movie: MovieDto,
}

#[derive(Debug, Serialize)]
pub struct UserCreated {
    pub message: &'static str,
    pub user: UserDto,
}

#[derive(Debug, Serialize)]
pub struct ReviewCreated {
    pub message: &'static str,
    pub review: ReviewDto,
}

#[derive(Debug, Serialize)]
pub struct FavoriteCreated {
    pub message: &'static str,
    pub favorite: FavoriteDto,
}

#[derive(Debug, Serialize)]
pub struct HealthDto {
    pub status: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movie_dto_uses_camel_case() {
        let dto = MovieDto {
            id: 1,
            name: "Die Hard".to_string(),
            year: 1988,
            genre_id: 2,
            genre: "Action".to_string(),
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["genreId"], 2);
        assert_eq!(json["genre"], "Action");
    }

    #[test]
    fn user_dto_has_no_password_field() {
        let dto = UserDto {
            id: 1,
            name: "Ann".to_string(),
            username: "ann".to_string(),
            year_of_birth: 1990,
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["yearOfBirth"], 1990);
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password").is_none());
    }
}
