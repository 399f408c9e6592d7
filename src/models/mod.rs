pub mod requests;

pub use requests::{
    AddFavoriteRequest, AddGenreRequest, AddMovieRequest, AddReviewRequest, IntegerLike,
    NewFavorite, NewGenre, NewMovie, NewReview, NewUser, RegisterUserRequest,
};
