pub mod add_favorite;
pub mod get_favorites;
pub mod providers;
pub mod remove_favorite;
pub mod search_movies;

pub use add_favorite::AddFavoriteUseCase;
pub use get_favorites::GetFavoritesUseCase;
pub use providers::MovieSearchProvider;
pub use remove_favorite::RemoveFavoriteUseCase;
pub use search_movies::SearchMoviesUseCase;
