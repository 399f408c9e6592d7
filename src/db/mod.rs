use crate::config::DatabaseConfig;
use crate::entities::{favorite, genre, review};
use crate::models::{NewFavorite, NewMovie, NewReview};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::movie::MovieWithGenre;
pub use repositories::user::User;

/// Handle to the relational store.
///
/// Cloning is cheap; every clone shares the same connection pool, which is
/// created once at startup and passed explicitly to whoever needs it.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

/// Returns the on-disk path for a file-backed SQLite URL.
fn sqlite_file_path(db_url: &str) -> Option<&str> {
    let path = db_url.strip_prefix("sqlite:")?;
    let path = path.trim_start_matches("//");
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() || path.starts_with(":memory:") {
        None
    } else {
        Some(path)
    }
}

fn is_in_memory(db_url: &str) -> bool {
    db_url.contains(":memory:") || db_url.contains("mode=memory")
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 1, 1).await
    }

    pub async fn from_config(config: &DatabaseConfig) -> Result<Self> {
        Self::with_pool_options(
            &config.url,
            config.max_connections,
            config.min_connections,
        )
        .await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if let Some(path_str) = sqlite_file_path(db_url) {
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        // An in-memory database lives only as long as its connection.
        if !is_in_memory(db_url) {
            opt.idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
        }

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn genre_repo(&self) -> repositories::genre::GenreRepository {
        repositories::genre::GenreRepository::new(self.conn.clone())
    }

    fn movie_repo(&self) -> repositories::movie::MovieRepository {
        repositories::movie::MovieRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn review_repo(&self) -> repositories::review::ReviewRepository {
        repositories::review::ReviewRepository::new(self.conn.clone())
    }

    fn favorite_repo(&self) -> repositories::favorite::FavoriteRepository {
        repositories::favorite::FavoriteRepository::new(self.conn.clone())
    }

    pub async fn find_genre_by_name_ci(&self, name: &str) -> Result<Option<genre::Model>, DbErr> {
        self.genre_repo().find_by_name_ci(name).await
    }

    pub async fn add_genre(&self, name: &str) -> Result<genre::Model, DbErr> {
        self.genre_repo().add(name).await
    }

    pub async fn list_genres(&self) -> Result<Vec<genre::Model>, DbErr> {
        self.genre_repo().list_all().await
    }

    pub async fn add_movie(&self, movie: &NewMovie) -> Result<Option<MovieWithGenre>, DbErr> {
        self.movie_repo().add_in_genre(movie).await
    }

    pub async fn list_movies(&self, offset: u64, limit: u64) -> Result<Vec<MovieWithGenre>, DbErr> {
        self.movie_repo().list_page(offset, limit).await
    }

    pub async fn get_movie(&self, id: i32) -> Result<Option<MovieWithGenre>, DbErr> {
        self.movie_repo().get(id).await
    }

    pub async fn delete_movie(&self, id: i32) -> Result<Option<MovieWithGenre>, DbErr> {
        self.movie_repo().delete(id).await
    }

    pub async fn search_movies(&self, keyword: &str) -> Result<Vec<MovieWithGenre>, DbErr> {
        self.movie_repo().search(keyword).await
    }

    pub async fn count_movies(&self) -> Result<u64, DbErr> {
        self.movie_repo().count().await
    }

    pub async fn list_favorite_movies(
        &self,
        username: &str,
    ) -> Result<Vec<MovieWithGenre>, DbErr> {
        self.movie_repo().list_favorited_by(username).await
    }

    pub async fn add_user(
        &self,
        name: &str,
        username: &str,
        password_hash: String,
        year_of_birth: i32,
    ) -> Result<User, DbErr> {
        self.user_repo()
            .add(name, username, password_hash, year_of_birth)
            .await
    }

    pub async fn get_user_password_hash(&self, username: &str) -> Result<Option<String>, DbErr> {
        self.user_repo().get_password_hash(username).await
    }

    pub async fn add_review(&self, review: &NewReview) -> Result<review::Model, DbErr> {
        self.review_repo().add(review).await
    }

    pub async fn add_favorite(&self, favorite: &NewFavorite) -> Result<favorite::Model, DbErr> {
        self.favorite_repo().add(favorite).await
    }
}
