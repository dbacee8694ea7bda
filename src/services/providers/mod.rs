/// Movie search provider abstraction
///
/// Use-cases depend on this trait only; the concrete provider (OMDb) is chosen at
/// startup in `main` and handed to the router state.
use crate::{error::AppResult, models::Movie};

pub mod omdb;

pub use omdb::OmdbProvider;

/// Trait for external movie search sources
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieSearchProvider: Send + Sync {
    /// Search movies by free text, one page at a time (pages start at 1)
    ///
    /// A source with no matches yields an empty list, not an error. Any transport or
    /// parse failure is reported as `AppError::SearchFailed`.
    async fn search_movies(&self, query: &str, page: u32) -> AppResult<Vec<Movie>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
