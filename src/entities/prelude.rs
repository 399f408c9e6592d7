pub use super::favorite::Entity as Favorite;
pub use super::genre::Entity as Genre;
pub use super::movie::Entity as Movie;
pub use super::movie_user::Entity as MovieUser;
pub use super::review::Entity as Review;
