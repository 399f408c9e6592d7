pub mod prelude;

pub mod favorite;
pub mod genre;
pub mod movie;
pub mod movie_user;
pub mod review;
