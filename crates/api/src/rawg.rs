//! RAWG video game database client for cover art lookup.
//!
//! Alternative [`ImageLookup`] source used when the collection server has no
//! `/game-image` endpoint. The API key comes from configuration and is sent
//! as a query parameter, so request URLs are never logged.

use serde::Deserialize;
use tracing::debug;

use crate::error::ApiError;
use crate::service::{ApiFuture, ImageLookup};

const DEFAULT_BASE_URL: &str = "https://api.rawg.io/api";

#[derive(Debug, Default, Deserialize)]
struct GamesPage {
    #[serde(default)]
    results: Vec<GameHit>,
}

#[derive(Debug, Deserialize)]
struct GameHit {
    #[serde(default)]
    background_image: Option<String>,
}

/// RAWG API client.
#[derive(Debug, Clone)]
pub struct RawgClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl RawgClient {
    /// Creates a new client with the given API key.
    pub fn new(api_key: &str) -> Result<Self, ApiError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(ApiError::MissingApiKey);
        }

        Ok(Self {
            http: reqwest::Client::builder().build()?,
            api_key: api_key.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Sets a custom base URL (for testing).
    #[cfg(test)]
    pub(crate) fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Background image of the best search hit for `name`, if any.
    pub async fn background_image(&self, name: &str) -> Result<Option<String>, ApiError> {
        let url = format!("{}/games", self.base_url);
        debug!(name, "RAWG image search");

        let resp = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("search", name),
                ("page_size", "1"),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Server {
                status: status.as_u16(),
                message: None,
            });
        }

        let page: GamesPage = serde_json::from_slice(&resp.bytes().await?)?;
        Ok(page
            .results
            .into_iter()
            .next()
            .and_then(|hit| hit.background_image)
            .filter(|u| !u.is_empty()))
    }
}

impl ImageLookup for RawgClient {
    fn find_image<'a>(&'a self, name: &'a str) -> ApiFuture<'a, Option<String>> {
        Box::pin(self.background_image(name))
    }
}
