use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// OMDb API key
    #[serde(default)]
    pub omdb_api_key: String,

    /// OMDb API base URL
    #[serde(default = "default_omdb_api_url")]
    pub omdb_api_url: String,

    /// Timeout for a single OMDb request, in milliseconds
    #[serde(default = "default_omdb_timeout_ms")]
    pub omdb_timeout_ms: u64,

    /// Origin of the frontend allowed by CORS
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_omdb_api_url() -> String {
    "https://www.omdbapi.com".to_string()
}

fn default_omdb_timeout_ms() -> u64 {
    5000
}

fn default_frontend_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn omdb_timeout(&self) -> Duration {
        Duration::from_millis(self.omdb_timeout_ms)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuration for the API client used by the frontend layer
#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    /// Base URL of the movie search API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_api_timeout_ms")]
    pub api_timeout_ms: u64,
}

fn default_api_base_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_api_timeout_ms() -> u64 {
    10_000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            api_timeout_ms: default_api_timeout_ms(),
        }
    }
}

impl ClientConfig {
    /// Load client configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<ClientConfig>()
            .map_err(|e| anyhow::anyhow!("Failed to load client config: {}", e))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.api_timeout_ms)
    }
}
