use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::info;

use crate::domain::name_key;
use crate::entities::{genre, prelude::*};

pub struct GenreRepository {
    conn: DatabaseConnection,
}

impl GenreRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Exact, case-sensitive lookup on any connection, including an open
    /// transaction.
    pub async fn find_by_name_on<C: ConnectionTrait>(
        db: &C,
        name: &str,
    ) -> Result<Option<genre::Model>, DbErr> {
        Genre::find()
            .filter(genre::Column::Name.eq(name))
            .one(db)
            .await
    }

    /// Case-insensitive lookup through the stored folded key.
    pub async fn find_by_name_ci(&self, name: &str) -> Result<Option<genre::Model>, DbErr> {
        Genre::find()
            .filter(genre::Column::NameKey.eq(name_key(name)))
            .one(&self.conn)
            .await
    }

    pub async fn add(&self, name: &str) -> Result<genre::Model, DbErr> {
        let model = genre::ActiveModel {
            name: Set(name.to_string()),
            name_key: Set(name_key(name)),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;

        info!(genre_id = model.id, "Added genre: {}", model.name);
        Ok(model)
    }

    pub async fn list_all(&self) -> Result<Vec<genre::Model>, DbErr> {
        Genre::find()
            .order_by_asc(genre::Column::Id)
            .all(&self.conn)
            .await
    }
}
