use std::sync::Arc;

use crate::{
    db::FavoritesRepository,
    error::{AppError, AppResult},
    models::{Favorite, NewFavorite},
};

/// Use case for adding a movie to favorites
pub struct AddFavoriteUseCase {
    repository: Arc<dyn FavoritesRepository>,
}

impl AddFavoriteUseCase {
    pub fn new(repository: Arc<dyn FavoritesRepository>) -> Self {
        Self { repository }
    }

    /// Fails with `Conflict` if a favorite with the same imdbID already exists
    pub async fn execute(&self, candidate: NewFavorite) -> AppResult<Favorite> {
        if self
            .repository
            .find_by_imdb_id(&candidate.imdb_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "Movie is already in favorites".to_string(),
            ));
        }

        self.repository.add_favorite(candidate).await
    }
}
