use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, Set};

use crate::entities::favorite;
use crate::models::NewFavorite;

pub struct FavoriteRepository {
    conn: DatabaseConnection,
}

impl FavoriteRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn add(&self, new: &NewFavorite) -> Result<favorite::Model, DbErr> {
        favorite::ActiveModel {
            username: Set(new.username.clone()),
            movie_id: Set(new.movie_id.value()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
    }
}
