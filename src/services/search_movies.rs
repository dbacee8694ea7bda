use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::Movie,
    services::providers::MovieSearchProvider,
};

pub const DEFAULT_PAGE: u32 = 1;

/// Use case for searching movies through the configured provider
pub struct SearchMoviesUseCase {
    provider: Arc<dyn MovieSearchProvider>,
}

impl SearchMoviesUseCase {
    pub fn new(provider: Arc<dyn MovieSearchProvider>) -> Self {
        Self { provider }
    }

    /// Rejects blank queries before the provider is called; provider errors pass through.
    pub async fn execute(&self, query: &str, page: u32) -> AppResult<Vec<Movie>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        self.provider.search_movies(query, page).await
    }
}
