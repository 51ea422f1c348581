//! Evidence lookup service
//!
//! The evidence tools issue free-text queries against an external search
//! service and reduce the returned snippets to short signals. The service is
//! behind the [`EvidenceSearch`] trait so tests can inject stubs; the
//! production implementation is [`TavilyClient`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const TAVILY_ENDPOINT: &str = "https://api.tavily.com/search";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// One search hit: a title plus a content snippet, both free text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Result title
    pub title: String,
    /// Content snippet (unbounded length; tools truncate)
    pub content: String,
}

/// Errors from the evidence lookup service
///
/// These never escape the evidence tools, which fall back to a deterministic
/// signal string on any failure.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Network or HTTP failure
    #[error("Search request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Search service error: {0}")]
    Api(String),

    /// Missing API key or other setup problem
    #[error("Search configuration error: {0}")]
    Configuration(String),
}

/// Evidence lookup interface
///
/// Returning zero results is not an error.
#[async_trait]
pub trait EvidenceSearch: Send + Sync {
    /// Run one query, returning at most `max_results` hits
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError>;
}

/// Tavily-backed evidence lookup
pub struct TavilyClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl TavilyClient {
    /// Create a client with the given API key
    pub fn new(api_key: impl Into<String>) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: TAVILY_ENDPOINT.to_string(),
        })
    }

    /// Create a client from the `TAVILY_API_KEY` environment variable
    pub fn from_env() -> Result<Self, SearchError> {
        let api_key = std::env::var("TAVILY_API_KEY").map_err(|_| {
            SearchError::Configuration("TAVILY_API_KEY environment variable not set".to_string())
        })?;
        Self::new(api_key)
    }

    /// Override the endpoint (local gateways, tests)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
}

#[async_trait]
impl EvidenceSearch for TavilyClient {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        debug!("Evidence lookup: {}", query);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&TavilyRequest {
                api_key: &self.api_key,
                query,
                max_results,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Api(format!("HTTP {status}: {body}")));
        }

        let parsed: TavilyResponse = response.json().await?;

        Ok(parsed
            .results
            .into_iter()
            .take(max_results)
            .map(|r| SearchResult {
                title: r.title,
                content: r.content,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = TavilyClient::new("tvly-test").unwrap();
        assert_eq!(client.endpoint, TAVILY_ENDPOINT);
    }

    #[test]
    fn test_response_parsing_tolerates_missing_fields() {
        let parsed: TavilyResponse = serde_json::from_str(r#"{"results": [{"title": "t"}]}"#).unwrap();
        assert_eq!(parsed.results.len(), 1);
        assert!(parsed.results[0].content.is_empty());

        let empty: TavilyResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.results.is_empty());
    }
}
