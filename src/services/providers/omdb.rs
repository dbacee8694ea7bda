/// OMDb API provider
///
/// Search only: `GET /?apikey=..&s=<query>&type=movie&page=<n>`. OMDb reports
/// "no results" in-band with `Response: "False"`, which maps to an empty list.
use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::{Movie, OmdbSearchResponse},
    services::providers::MovieSearchProvider,
};

const CONTENT_TYPE_FILTER: &str = "movie";

#[derive(Clone)]
pub struct OmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl OmdbProvider {
    /// Creates a provider whose requests are bounded by `timeout`
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        if api_key.is_empty() {
            tracing::warn!("OMDB_API_KEY is not configured");
        }

        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_page(&self, query: &str, page: u32) -> Result<OmdbSearchResponse, reqwest::Error> {
        let url = format!("{}/", self.api_url);
        let page = page.to_string();

        self.http_client
            .get(&url)
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("s", query),
                ("type", CONTENT_TYPE_FILTER),
                ("page", page.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<OmdbSearchResponse>()
            .await
    }
}

#[async_trait::async_trait]
impl MovieSearchProvider for OmdbProvider {
    async fn search_movies(&self, query: &str, page: u32) -> AppResult<Vec<Movie>> {
        let response = self.fetch_page(query, page).await.map_err(|e| {
            tracing::error!(
                error = %e,
                query = %query,
                page = page,
                timeout = e.is_timeout(),
                "Failed to search movies"
            );
            AppError::SearchFailed
        })?;

        if !response.is_success() {
            tracing::warn!(
                query = %query,
                page = page,
                error = response.error.as_deref().unwrap_or_default(),
                "OMDb API returned no results"
            );
            return Ok(Vec::new());
        }

        let movies: Vec<Movie> = response
            .search
            .unwrap_or_default()
            .into_iter()
            .map(Movie::from)
            .collect();

        tracing::info!(
            query = %query,
            page = page,
            results = movies.len(),
            provider = self.name(),
            "Movie search completed"
        );

        Ok(movies)
    }

    fn name(&self) -> &'static str {
        "omdb"
    }
}
