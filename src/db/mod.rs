/// Favorites storage abstraction
///
/// Use-cases only see `FavoritesRepository`; the in-memory adapter is the single
/// implementation, so favorites live as long as the process does.
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Favorite, NewFavorite},
};

pub mod memory;

pub use memory::InMemoryFavoritesRepository;

/// Trait for favorites storage
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait FavoritesRepository: Send + Sync {
    /// Stores a candidate, assigning a fresh id and the current time
    ///
    /// Fails with `AppError::Conflict` when a favorite with the same imdbID is already stored.
    async fn add_favorite(&self, candidate: NewFavorite) -> AppResult<Favorite>;

    /// Deletes a favorite; `false` when no favorite had that id
    async fn remove_favorite(&self, id: Uuid) -> AppResult<bool>;

    /// All favorites, most recently added first
    async fn get_favorites(&self) -> AppResult<Vec<Favorite>>;

    async fn find_by_imdb_id(&self, imdb_id: &str) -> AppResult<Option<Favorite>>;
}
