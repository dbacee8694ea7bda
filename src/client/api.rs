/// HTTP client for the movie search API
///
/// The hooks depend on `MovieBackend`; `MovieApi` is its reqwest implementation.
use reqwest::{Client as HttpClient, Response};
use serde::{de::DeserializeOwned, Deserialize};
use uuid::Uuid;

use crate::{
    client::error::{ClientError, ClientResult},
    config::ClientConfig,
    models::{AddFavoriteResponse, Favorite, FavoritesResponse, Movie, SearchResponse},
};

/// Operations of the movie search API used by the frontend
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieBackend: Send + Sync {
    async fn search_movies(&self, query: &str, page: u32) -> ClientResult<Vec<Movie>>;

    async fn get_favorites(&self) -> ClientResult<Vec<Favorite>>;

    async fn add_favorite(&self, movie: &Movie) -> ClientResult<Favorite>;

    async fn remove_favorite(&self, id: Uuid) -> ClientResult<()>;
}

#[derive(Clone)]
pub struct MovieApi {
    http_client: HttpClient,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl MovieApi {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let http_client = HttpClient::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            http_client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decodes a success body, or turns an error status into `ClientError::Status`
    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or(body);

        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait::async_trait]
impl MovieBackend for MovieApi {
    async fn search_movies(&self, query: &str, page: u32) -> ClientResult<Vec<Movie>> {
        let response = self
            .http_client
            .get(self.url("/movies/search"))
            .query(&[("q", query), ("page", page.to_string().as_str())])
            .send()
            .await?;

        let body: SearchResponse = Self::decode(response).await?;
        Ok(body.movies)
    }

    async fn get_favorites(&self) -> ClientResult<Vec<Favorite>> {
        let response = self.http_client.get(self.url("/favorites")).send().await?;

        let body: FavoritesResponse = Self::decode(response).await?;
        Ok(body.favorites)
    }

    async fn add_favorite(&self, movie: &Movie) -> ClientResult<Favorite> {
        let response = self
            .http_client
            .post(self.url("/favorites"))
            .json(movie)
            .send()
            .await?;

        let body: AddFavoriteResponse = Self::decode(response).await?;
        Ok(body.favorite)
    }

    async fn remove_favorite(&self, id: Uuid) -> ClientResult<()> {
        let response = self
            .http_client
            .delete(self.url(&format!("/favorites/{}", id)))
            .send()
            .await?;

        let _: serde_json::Value = Self::decode(response).await?;
        Ok(())
    }
}
