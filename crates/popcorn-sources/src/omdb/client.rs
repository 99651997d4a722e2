use crate::error::DirectoryError;
use crate::omdb::parser;
use crate::traits::MovieDirectory;
use anyhow::Result;
use async_trait::async_trait;
use popcorn_config::OmdbConfig;
use popcorn_models::{MovieDetail, SearchResultSummary};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct OmdbClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("popcorn/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url,
            api_key,
        })
    }

    pub fn from_config(config: &OmdbConfig) -> Result<Self> {
        Self::new(
            config.base_url.clone(),
            config.api_key.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET the base URL with `apikey` plus one lookup parameter and return the raw body
    async fn fetch(&self, param: &str, value: &str) -> Result<String, DirectoryError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str()), (param, value)])
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            warn!(%status, "OMDb request failed");
            return Err(DirectoryError::Network(format!("{} - {}", status, error_text)));
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl MovieDirectory for OmdbClient {
    fn source_name(&self) -> &str {
        "omdb"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResultSummary>, DirectoryError> {
        debug!(query, "Searching OMDb");
        let body = self.fetch("s", query).await?;
        parser::parse_search_response(&body)
    }

    async fn get_movie(&self, imdb_id: &str) -> Result<MovieDetail, DirectoryError> {
        debug!(imdb_id, "Fetching OMDb detail");
        let body = self.fetch("i", imdb_id).await?;
        parser::parse_detail_response(&body)
    }
}
