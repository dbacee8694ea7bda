use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    client::{
        api::MovieBackend,
        cache::{QueryCache, QueryKey},
        error::ClientResult,
    },
    models::Movie,
};

/// Results per OMDb page; a shorter page is the last one
pub const PAGE_SIZE: usize = 10;

/// Search state for one search box: current query plus the pages fetched for it.
///
/// Pages are cached per query string, so returning to an earlier query restores its
/// pages without refetching. Fetches are sequential; a result that arrives after the
/// query changed is dropped.
pub struct MovieSearch {
    backend: Arc<dyn MovieBackend>,
    cache: Arc<QueryCache>,
    state: Mutex<SearchState>,
    fetch_lock: tokio::sync::Mutex<()>,
}

#[derive(Default)]
struct SearchState {
    query: String,
    pages: Vec<Vec<Movie>>,
    is_loading: bool,
    is_fetching_next_page: bool,
}

impl MovieSearch {
    pub fn new(backend: Arc<dyn MovieBackend>, cache: Arc<QueryCache>) -> Self {
        Self {
            backend,
            cache,
            state: Mutex::new(SearchState::default()),
            fetch_lock: tokio::sync::Mutex::new(()),
        }
    }

    fn state(&self) -> MutexGuard<'_, SearchState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Makes `query` current and loads its first page unless it is cached.
    /// An empty query only clears the results.
    pub async fn handle_search(&self, query: &str) -> ClientResult<()> {
        let key = QueryKey::Movies(query.to_string());
        let cached: Option<Vec<Vec<Movie>>> = self.cache.get(&key);

        {
            let mut state = self.state();
            state.query = query.to_string();
            state.is_fetching_next_page = false;
            state.is_loading = !query.is_empty() && cached.is_none();
            state.pages = cached.unwrap_or_default();
            if !state.is_loading {
                return Ok(());
            }
        }

        let _fetching = self.fetch_lock.lock().await;
        let still_current = self.state().query == query;
        if !still_current {
            return Ok(());
        }

        let result = self.backend.search_movies(query, 1).await;

        let mut state = self.state();
        let is_current = state.query == query;
        if is_current {
            state.is_loading = false;
        }

        let page = result?;
        tracing::debug!(query = %query, results = page.len(), current = is_current, "Fetched first page");

        let pages = vec![page];
        self.cache.set(&key, &pages);
        if is_current {
            state.pages = pages;
        }
        Ok(())
    }

    /// Fetches page `pages_fetched + 1` of the current query, if there is one.
    pub async fn fetch_next_page(&self) -> ClientResult<()> {
        let _fetching = self.fetch_lock.lock().await;

        let (query, next_page) = {
            let mut state = self.state();
            if !has_next_page(&state.pages) {
                return Ok(());
            }
            state.is_fetching_next_page = true;
            (state.query.clone(), state.pages.len() + 1)
        };

        let result = self.backend.search_movies(&query, next_page as u32).await;

        let mut state = self.state();
        let is_current = state.query == query && state.pages.len() + 1 == next_page;
        if state.query == query {
            state.is_fetching_next_page = false;
        }

        let page = result?;
        if is_current {
            tracing::debug!(query = %query, page = next_page, results = page.len(), "Fetched next page");
            state.pages.push(page);
            self.cache.set(&QueryKey::Movies(query), &state.pages);
        }
        Ok(())
    }

    /// Clears the query and every accumulated result
    pub fn reset_search(&self) {
        *self.state() = SearchState::default();
    }

    pub fn search_query(&self) -> String {
        self.state().query.clone()
    }

    /// All fetched pages of the current query, flattened in page order
    pub fn search_results(&self) -> Vec<Movie> {
        self.state().pages.iter().flatten().cloned().collect()
    }

    pub fn pages_fetched(&self) -> usize {
        self.state().pages.len()
    }

    pub fn has_next_page(&self) -> bool {
        has_next_page(&self.state().pages)
    }

    pub fn is_loading(&self) -> bool {
        self.state().is_loading
    }

    pub fn is_fetching_next_page(&self) -> bool {
        self.state().is_fetching_next_page
    }
}

/// A full last page means there may be more
fn has_next_page(pages: &[Vec<Movie>]) -> bool {
    pages.last().is_some_and(|page| page.len() >= PAGE_SIZE)
}
