use sea_orm::sea_query::LikeExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};
use tracing::info;

use super::genre::GenreRepository;
use crate::domain::name_key;
use crate::entities::{favorite, genre, movie, prelude::*};
use crate::models::NewMovie;

/// A movie row joined to the name of its genre.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct MovieWithGenre {
    pub id: i32,
    pub name: String,
    pub year: i32,
    pub genre_id: i32,
    pub genre: String,
}

impl MovieWithGenre {
    fn from_parts(model: movie::Model, genre: String) -> Self {
        Self {
            id: model.id,
            name: model.name,
            year: model.year,
            genre_id: model.genre_id,
            genre,
        }
    }
}

/// `movie INNER JOIN genre`, ordered by movie id so pages are stable.
fn with_genre() -> Select<movie::Entity> {
    Movie::find()
        .inner_join(Genre)
        .column_as(genre::Column::Name, "genre")
        .order_by_asc(movie::Column::Id)
}

/// Escapes `LIKE` wildcards so the keyword matches literally.
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Resolves the genre by exact name and inserts the movie in one transaction.
    ///
    /// Returns `None` (and writes nothing) when the genre does not exist.
    pub async fn add_in_genre(&self, new: &NewMovie) -> Result<Option<MovieWithGenre>, DbErr> {
        let txn = self.conn.begin().await?;

        let Some(genre) = GenreRepository::find_by_name_on(&txn, &new.genre).await? else {
            txn.rollback().await?;
            return Ok(None);
        };

        let model = movie::ActiveModel {
            name: Set(new.name.clone()),
            name_key: Set(name_key(&new.name)),
            year: Set(new.year),
            genre_id: Set(genre.id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(movie_id = model.id, genre = %genre.name, "Added movie: {}", model.name);
        Ok(Some(MovieWithGenre::from_parts(model, genre.name)))
    }

    pub async fn list_page(&self, offset: u64, limit: u64) -> Result<Vec<MovieWithGenre>, DbErr> {
        with_genre()
            .offset(offset)
            .limit(limit)
            .into_model::<MovieWithGenre>()
            .all(&self.conn)
            .await
    }

    pub async fn get(&self, id: i32) -> Result<Option<MovieWithGenre>, DbErr> {
        with_genre()
            .filter(movie::Column::Id.eq(id))
            .into_model::<MovieWithGenre>()
            .one(&self.conn)
            .await
    }

    /// Deletes the movie and returns the row as it was, or `None` if nothing matched.
    pub async fn delete(&self, id: i32) -> Result<Option<MovieWithGenre>, DbErr> {
        let txn = self.conn.begin().await?;

        let Some(existing) = with_genre()
            .filter(movie::Column::Id.eq(id))
            .into_model::<MovieWithGenre>()
            .one(&txn)
            .await?
        else {
            txn.rollback().await?;
            return Ok(None);
        };

        let result = Movie::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(None);
        }

        txn.commit().await?;

        info!(movie_id = id, "Deleted movie: {}", existing.name);
        Ok(Some(existing))
    }

    /// Case-insensitive substring match on the movie name, via the folded key.
    pub async fn search(&self, keyword: &str) -> Result<Vec<MovieWithGenre>, DbErr> {
        let pattern = format!("%{}%", escape_like(&name_key(keyword)));

        with_genre()
            .filter(movie::Column::NameKey.like(LikeExpr::new(pattern).escape('\\')))
            .into_model::<MovieWithGenre>()
            .all(&self.conn)
            .await
    }

    /// Movies a user has marked as favorite.
    pub async fn list_favorited_by(&self, username: &str) -> Result<Vec<MovieWithGenre>, DbErr> {
        with_genre()
            .inner_join(Favorite)
            .filter(favorite::Column::Username.eq(username))
            .into_model::<MovieWithGenre>()
            .all(&self.conn)
            .await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        Movie::find().count(&self.conn).await
    }
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn escape_like_escapes_wildcards() {
        assert_eq!(escape_like("die hard"), "die hard");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("c:\\"), "c:\\\\");
    }
}
