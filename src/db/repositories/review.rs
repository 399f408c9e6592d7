use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, Set};

use crate::entities::review;
use crate::models::NewReview;

pub struct ReviewRepository {
    conn: DatabaseConnection,
}

impl ReviewRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn add(&self, new: &NewReview) -> Result<review::Model, DbErr> {
        review::ActiveModel {
            username: Set(new.username.clone()),
            stars: Set(new.stars),
            review_text: Set(new.review_text.clone()),
            movie_id: Set(new.movie_id.value()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
    }
}
