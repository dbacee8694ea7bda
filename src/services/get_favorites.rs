use std::sync::Arc;

use crate::{db::FavoritesRepository, error::AppResult, models::Favorite};

/// Use case for listing favorites
pub struct GetFavoritesUseCase {
    repository: Arc<dyn FavoritesRepository>,
}

impl GetFavoritesUseCase {
    pub fn new(repository: Arc<dyn FavoritesRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> AppResult<Vec<Favorite>> {
        self.repository.get_favorites().await
    }
}
