use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::FavoritesRepository,
    error::{AppError, AppResult},
};

/// Use case for removing a favorite by its id
pub struct RemoveFavoriteUseCase {
    repository: Arc<dyn FavoritesRepository>,
}

impl RemoveFavoriteUseCase {
    pub fn new(repository: Arc<dyn FavoritesRepository>) -> Self {
        Self { repository }
    }

    /// Fails with `NotFound` when nothing was deleted. Ids that are not UUIDs cannot exist.
    pub async fn execute(&self, id: &str) -> AppResult<()> {
        let not_found = || AppError::NotFound("Favorite not found".to_string());

        let id = Uuid::parse_str(id).map_err(|_| not_found())?;

        if !self.repository.remove_favorite(id).await? {
            return Err(not_found());
        }

        Ok(())
    }
}
