//! `SeaORM` implementation of the `CatalogService` trait.

use crate::api::types::{FavoriteDto, GenreDto, MovieDto, ReviewDto, UserDto};
use crate::config::SecurityConfig;
use crate::db::Store;
use crate::domain::{MovieId, Page};
use crate::models::{
    AddFavoriteRequest, AddGenreRequest, AddMovieRequest, AddReviewRequest, RegisterUserRequest,
};
use crate::services::catalog_service::{CatalogError, CatalogService};
use crate::services::credentials;
use async_trait::async_trait;
use tracing::{debug, warn};

pub struct SeaOrmCatalogService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmCatalogService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }
}

#[async_trait]
impl CatalogService for SeaOrmCatalogService {
    async fn add_genre(&self, request: AddGenreRequest) -> Result<GenreDto, CatalogError> {
        let genre = request.validate()?;

        if let Some(existing) = self.store.find_genre_by_name_ci(&genre.name).await? {
            debug!(existing = %existing.name, "Rejected duplicate genre");
            return Err(CatalogError::Duplicate(format!(
                "Genre '{}' already exists",
                existing.name
            )));
        }

        // Two concurrent adds can both pass the check above; the unique index decides.
        let model = self.store.add_genre(&genre.name).await.map_err(|e| {
            match CatalogError::from(e) {
                CatalogError::Duplicate(_) => {
                    CatalogError::Duplicate(format!("Genre '{}' already exists", genre.name))
                }
                other => other,
            }
        })?;

        Ok(GenreDto::from(model))
    }

    async fn list_genres(&self) -> Result<Vec<GenreDto>, CatalogError> {
        let genres = self.store.list_genres().await?;
        Ok(genres.into_iter().map(GenreDto::from).collect())
    }

    async fn add_movie(&self, request: AddMovieRequest) -> Result<MovieDto, CatalogError> {
        let movie = request.validate()?;

        let Some(created) = self.store.add_movie(&movie).await? else {
            return Err(CatalogError::UnknownGenre(movie.genre));
        };

        Ok(MovieDto::from(created))
    }

    async fn list_movies(&self, page: Page) -> Result<Vec<MovieDto>, CatalogError> {
        let movies = self.store.list_movies(page.offset(), page.limit()).await?;
        Ok(movies.into_iter().map(MovieDto::from).collect())
    }

    async fn get_movie(&self, id: MovieId) -> Result<MovieDto, CatalogError> {
        self.store
            .get_movie(id.value())
            .await?
            .map(MovieDto::from)
            .ok_or_else(|| CatalogError::movie_not_found(id))
    }

    async fn delete_movie(&self, id: MovieId) -> Result<MovieDto, CatalogError> {
        self.store
            .delete_movie(id.value())
            .await?
            .map(MovieDto::from)
            .ok_or_else(|| CatalogError::movie_not_found(id))
    }

    async fn search_movies(&self, keyword: Option<String>) -> Result<Vec<MovieDto>, CatalogError> {
        let keyword = keyword
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| CatalogError::Validation("Keyword is required".to_string()))?;

        let movies = self.store.search_movies(&keyword).await?;
        Ok(movies.into_iter().map(MovieDto::from).collect())
    }

    async fn register_user(&self, request: RegisterUserRequest) -> Result<UserDto, CatalogError> {
        let user = request.validate()?;

        let password_hash =
            credentials::hash_password_blocking(user.password, self.security.clone()).await?;

        let created = self
            .store
            .add_user(&user.name, &user.username, password_hash, user.year_of_birth)
            .await
            .map_err(|e| match CatalogError::from(e) {
                CatalogError::Duplicate(_) => CatalogError::Duplicate(format!(
                    "Username '{}' is already taken",
                    user.username
                )),
                other => other,
            })?;

        Ok(UserDto::from(created))
    }

    async fn add_review(&self, request: AddReviewRequest) -> Result<ReviewDto, CatalogError> {
        let review = request.validate()?;

        let model = self.store.add_review(&review).await.map_err(|e| {
            warn!(movie_id = %review.movie_id, error = %e, "Failed to add review");
            CatalogError::from(e)
        })?;

        Ok(ReviewDto::from(model))
    }

    async fn add_favorite(&self, request: AddFavoriteRequest) -> Result<FavoriteDto, CatalogError> {
        let favorite = request.validate()?;

        let model = self.store.add_favorite(&favorite).await.map_err(|e| {
            warn!(movie_id = %favorite.movie_id, error = %e, "Failed to add favorite");
            CatalogError::from(e)
        })?;

        Ok(FavoriteDto::from(model))
    }

    async fn list_favorites(&self, username: &str) -> Result<Vec<MovieDto>, CatalogError> {
        let movies = self.store.list_favorite_movies(username).await?;
        Ok(movies.into_iter().map(MovieDto::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IntegerLike;
    use crate::services::credentials::verify_password;

    fn fast_security() -> SecurityConfig {
        SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            argon2_parallelism: 1,
        }
    }

    async fn service() -> (SeaOrmCatalogService, Store) {
        let store = Store::new("sqlite::memory:").await.unwrap();
        (
            SeaOrmCatalogService::new(store.clone(), fast_security()),
            store,
        )
    }

    fn genre(name: &str) -> AddGenreRequest {
        AddGenreRequest {
            name: Some(name.to_string()),
        }
    }

    fn movie(name: &str, year: i64, genre: &str) -> AddMovieRequest {
        AddMovieRequest {
            name: Some(name.to_string()),
            year: Some(IntegerLike::from(year)),
            genre: Some(genre.to_string()),
        }
    }

    #[tokio::test]
    async fn add_genre_then_list_contains_it_once() {
        let (svc, _) = service().await;

        let created = svc.add_genre(genre("Action")).await.unwrap();
        assert_eq!(created.name, "Action");

        let genres = svc.list_genres().await.unwrap();
        assert_eq!(genres, vec![created]);
    }

    #[tokio::test]
    async fn add_genre_rejects_case_variant() {
        let (svc, _) = service().await;
        svc.add_genre(genre("Action")).await.unwrap();

        let err = svc.add_genre(genre("ACTION")).await.unwrap_err();
        assert!(matches!(err, CatalogError::Duplicate(_)));
        assert_eq!(svc.list_genres().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn add_genre_rejects_non_ascii_case_variant() {
        let (svc, _) = service().await;
        svc.add_genre(genre("Épopée")).await.unwrap();

        let err = svc.add_genre(genre("ÉPOPÉE")).await.unwrap_err();
        assert!(
            matches!(err, CatalogError::Duplicate(ref m) if m == "Genre 'Épopée' already exists")
        );
        assert_eq!(svc.list_genres().await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_adds_of_one_genre_keep_a_single_row() {
        let path =
            std::env::temp_dir().join(format!("moviedb-genre-race-{}.db", uuid::Uuid::new_v4()));
        let url = format!("sqlite:{}", path.display());
        let store = Store::with_pool_options(&url, 2, 1).await.unwrap();
        let svc = SeaOrmCatalogService::new(store.clone(), fast_security());

        let (first, second) = tokio::join!(
            svc.add_genre(genre("Action")),
            svc.add_genre(genre("action"))
        );

        let mut outcomes = [first, second];
        outcomes.sort_by_key(Result::is_err);
        let [won, lost] = outcomes;
        assert!(won.is_ok());
        assert!(
            matches!(lost, Err(CatalogError::Duplicate(ref m)) if m.contains("already exists"))
        );
        assert_eq!(svc.list_genres().await.unwrap().len(), 1);

        store.conn.close().await.unwrap();
        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn add_genre_validates_before_store() {
        let (svc, _) = service().await;
        let err = svc.add_genre(AddGenreRequest::default()).await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert!(svc.list_genres().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_movie_with_unknown_genre_writes_nothing() {
        let (svc, store) = service().await;
        svc.add_genre(genre("Action")).await.unwrap();

        let err = svc
            .add_movie(movie("Alien", 1979, "Horror"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::UnknownGenre(ref g) if g == "Horror"));
        assert_eq!(store.count_movies().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn add_movie_genre_lookup_is_exact() {
        let (svc, _) = service().await;
        svc.add_genre(genre("Action")).await.unwrap();

        let err = svc
            .add_movie(movie("Die Hard", 1988, "action"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::UnknownGenre(_)));
    }

    #[tokio::test]
    async fn get_movie_after_add_matches() {
        let (svc, _) = service().await;
        let action = svc.add_genre(genre("Action")).await.unwrap();

        let created = svc
            .add_movie(movie("Die Hard", 1988, "Action"))
            .await
            .unwrap();
        assert_eq!(created.genre, "Action");
        assert_eq!(created.genre_id, action.id);

        let fetched = svc.get_movie(MovieId::new(created.id)).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "Die Hard");
        assert_eq!(fetched.year, 1988);
    }

    #[tokio::test]
    async fn get_missing_movie_is_not_found() {
        let (svc, _) = service().await;
        let err = svc.get_movie(MovieId::new(99)).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_twice_is_not_found_second_time() {
        let (svc, store) = service().await;
        svc.add_genre(genre("Action")).await.unwrap();
        let keep = svc
            .add_movie(movie("Heat", 1995, "Action"))
            .await
            .unwrap();
        let doomed = svc
            .add_movie(movie("Die Hard", 1988, "Action"))
            .await
            .unwrap();

        let deleted = svc.delete_movie(MovieId::new(doomed.id)).await.unwrap();
        assert_eq!(deleted, doomed);

        let err = svc.delete_movie(MovieId::new(doomed.id)).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
        assert_eq!(store.count_movies().await.unwrap(), 1);
        assert!(svc.get_movie(MovieId::new(keep.id)).await.is_ok());
    }

    #[tokio::test]
    async fn list_movies_paginates_by_id() {
        let (svc, _) = service().await;
        svc.add_genre(genre("Drama")).await.unwrap();
        for i in 1..=15 {
            svc.add_movie(movie(&format!("Movie {i}"), 2000 + i, "Drama"))
                .await
                .unwrap();
        }

        let first = svc.list_movies(Page::default()).await.unwrap();
        assert_eq!(first.len(), 10);
        assert_eq!(first[0].name, "Movie 1");
        assert_eq!(first[9].name, "Movie 10");

        let second = svc.list_movies(Page::new(2).unwrap()).await.unwrap();
        let names: Vec<_> = second.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Movie 11", "Movie 12", "Movie 13", "Movie 14", "Movie 15"]
        );

        let third = svc.list_movies(Page::new(3).unwrap()).await.unwrap();
        assert!(third.is_empty());
    }

    #[tokio::test]
    async fn search_is_case_insensitive_substring() {
        let (svc, _) = service().await;
        svc.add_genre(genre("Action")).await.unwrap();
        svc.add_movie(movie("Die Hard", 1988, "Action"))
            .await
            .unwrap();
        svc.add_movie(movie("Die Hard 2", 1990, "Action"))
            .await
            .unwrap();
        svc.add_movie(movie("Heat", 1995, "Action")).await.unwrap();

        let found = svc.search_movies(Some("HARD".to_string())).await.unwrap();
        let names: Vec<_> = found.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Die Hard", "Die Hard 2"]);

        let none = svc.search_movies(Some("100%".to_string())).await.unwrap();
        assert!(none.is_empty());

        let err = svc.search_movies(None).await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        let err = svc.search_movies(Some("  ".to_string())).await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[tokio::test]
    async fn register_user_stores_only_a_hash() {
        let (svc, store) = service().await;

        let user = svc
            .register_user(RegisterUserRequest {
                name: Some("Ann".to_string()),
                username: Some("ann".to_string()),
                password: Some("s3cret".to_string()),
                year_of_birth: Some(IntegerLike::from(1990)),
            })
            .await
            .unwrap();
        assert_eq!(user.username, "ann");
        assert_eq!(user.year_of_birth, 1990);

        let hash = store.get_user_password_hash("ann").await.unwrap().unwrap();
        assert_ne!(hash, "s3cret");
        assert!(verify_password("s3cret", &hash).unwrap());
        assert!(!verify_password("s3cret ", &hash).unwrap());
        assert!(!verify_password("other", &hash).unwrap());
    }

    #[tokio::test]
    async fn register_user_rejects_taken_username() {
        let (svc, _) = service().await;
        let request = RegisterUserRequest {
            name: Some("Ann".to_string()),
            username: Some("ann".to_string()),
            password: Some("pw".to_string()),
            year_of_birth: Some(IntegerLike::from(1990)),
        };

        svc.register_user(request.clone()).await.unwrap();
        let err = svc.register_user(request).await.unwrap_err();
        assert!(matches!(err, CatalogError::Duplicate(_)));
    }

    #[tokio::test]
    async fn reviews_and_favorites_round_trip() {
        let (svc, _) = service().await;
        svc.add_genre(genre("Action")).await.unwrap();
        let die_hard = svc
            .add_movie(movie("Die Hard", 1988, "Action"))
            .await
            .unwrap();
        let heat = svc
            .add_movie(movie("Heat", 1995, "Action"))
            .await
            .unwrap();

        let review = svc
            .add_review(AddReviewRequest {
                username: Some("ann".to_string()),
                stars: Some(IntegerLike::from(5)),
                review_text: Some("Yippee-ki-yay".to_string()),
                movie_id: Some(IntegerLike::from(i64::from(die_hard.id))),
            })
            .await
            .unwrap();
        assert_eq!(review.movie_id, die_hard.id);
        assert_eq!(review.stars, 5);

        for id in [heat.id, die_hard.id] {
            svc.add_favorite(AddFavoriteRequest {
                username: Some("ann".to_string()),
                movie_id: Some(IntegerLike::from(i64::from(id))),
            })
            .await
            .unwrap();
        }

        let favorites = svc.list_favorites("ann").await.unwrap();
        let ids: Vec<_> = favorites.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![die_hard.id, heat.id]);
        assert_eq!(favorites[0].genre, "Action");

        assert!(svc.list_favorites("bob").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn favorite_for_missing_movie_is_a_store_error() {
        let (svc, _) = service().await;
        let err = svc
            .add_favorite(AddFavoriteRequest {
                username: Some("ann".to_string()),
                movie_id: Some(IntegerLike::from(404)),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Store(_)));
    }
}
