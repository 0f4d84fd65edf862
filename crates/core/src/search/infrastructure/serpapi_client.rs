/// SerpApi Google Images client over blocking reqwest.
///
/// Every failure mode (transport, HTTP status, malformed JSON, API-level
/// `error` field) is logged and mapped to an empty result list.
use serde::Deserialize;
use thiserror::Error;

use crate::search::domain::image_search::ImageSearch;
use crate::shared::constants::{SEARCH_ENDPOINT, SEARCH_ENGINE, SEARCH_TIMEOUT};

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("search service returned HTTP {0}")]
    Status(u16),
    #[error("search service reported: {0}")]
    Api(String),
    #[error("malformed search response: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    images_results: Vec<ImageResult>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct ImageResult {
    original: Option<String>,
}

pub struct SerpApiClient {
    client: reqwest::blocking::Client,
    api_key: String,
    endpoint: String,
}

impl SerpApiClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(SEARCH_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: SEARCH_ENDPOINT.to_string(),
        })
    }

    /// Points the client at a different search endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn fetch(&self, query: &str, page: u32) -> Result<Vec<String>, SearchError> {
        let page = page.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("engine", SEARCH_ENGINE),
                ("q", query),
                ("api_key", self.api_key.as_str()),
                ("ijn", page.as_str()),
            ])
            .send()?;
        let status = response.status();
        let text = response.text()?;
        parse_response(status.is_success(), status.as_u16(), &text)
    }
}

impl ImageSearch for SerpApiClient {
    fn search(&self, query: &str, page: u32) -> Vec<String> {
        match self.fetch(query, page) {
            Ok(urls) => urls,
            Err(e) => {
                log::warn!("Search for '{query}' (page {page}) failed: {e}");
                Vec::new()
            }
        }
    }
}

fn parse_response(success: bool, status: u16, body: &str) -> Result<Vec<String>, SearchError> {
    match serde_json::from_str::<SearchResponse>(body) {
        Ok(SearchResponse {
            error: Some(message),
            ..
        }) => Err(SearchError::Api(message)),
        Ok(_) | Err(_) if !success => Err(SearchError::Status(status)),
        Ok(parsed) => Ok(parsed
            .images_results
            .into_iter()
            .filter_map(|result| result.original)
            .collect()),
        Err(e) => Err(SearchError::Parse(e)),
    }
}
