use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set};
use tracing::info;

use crate::entities::{movie_user, prelude::*};

/// User data returned from repository (without sensitive password hash)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub year_of_birth: i32,
}

impl From<movie_user::Model> for User {
    fn from(model: movie_user::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            username: model.username,
            year_of_birth: model.year_of_birth,
        }
    }
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Inserts a user. `password_hash` must already be hashed.
    pub async fn add(
        &self,
        name: &str,
        username: &str,
        password_hash: String,
        year_of_birth: i32,
    ) -> Result<User, DbErr> {
        let model = movie_user::ActiveModel {
            name: Set(name.to_string()),
            username: Set(username.to_string()),
            password_hash: Set(password_hash),
            year_of_birth: Set(year_of_birth),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;

        info!(user_id = model.id, "Registered user: {}", model.username);
        Ok(User::from(model))
    }

    /// Stored hash for a user, for credential verification.
    pub async fn get_password_hash(&self, username: &str) -> Result<Option<String>, DbErr> {
        let user = MovieUser::find()
            .filter(movie_user::Column::Username.eq(username))
            .one(&self.conn)
            .await?;

        Ok(user.map(|u| u.password_hash))
    }
}
