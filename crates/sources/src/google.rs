//! Google Custom Search source connector.
//!
//! Uses the Custom Search JSON API; requires both an API key and a search
//! engine id (cx).

use quanta_core::{AppError, AppResult, SearchHit};
use serde::Deserialize;
use std::time::Duration;

/// Custom Search JSON API endpoint.
const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Per-request HTTP timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct GoogleResponse {
    #[serde(default)]
    items: Vec<GoogleItem>,
}

#[derive(Debug, Deserialize)]
struct GoogleItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    link: String,
}

/// Searches using the Google Custom Search API.
pub struct GoogleSearcher {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    cse_id: Option<String>,
    max_results: usize,
}

impl GoogleSearcher {
    pub fn new(
        api_key: Option<String>,
        cse_id: Option<String>,
        max_results: usize,
    ) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Source(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            cse_id,
            max_results,
        })
    }

    /// Check if API credentials are configured.
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
            && self.cse_id.as_deref().is_some_and(|c| !c.is_empty())
    }

    /// Search via Google Custom Search. Returns an empty list when not
    /// configured.
    pub async fn search(&self, query: &str) -> AppResult<Vec<SearchHit>> {
        if !self.is_configured() {
            tracing::debug!("Google Custom Search credentials not configured, skipping");
            return Ok(Vec::new());
        }

        // is_configured checked both above
        let api_key = self.api_key.as_deref().unwrap_or_default();
        let cse_id = self.cse_id.as_deref().unwrap_or_default();

        let enhanced_query = format!("{} quantum computing quantum mechanics", query);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("key", api_key),
                ("cx", cse_id),
                ("q", enhanced_query.as_str()),
                ("num", &self.max_results.to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Source(format!("Google search request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Source(format!(
                "Google API error ({})",
                response.status()
            )));
        }

        let data: GoogleResponse = response
            .json()
            .await
            .map_err(|e| AppError::Source(format!("Failed to parse Google response: {}", e)))?;

        let hits: Vec<SearchHit> = data
            .items
            .into_iter()
            .map(|item| SearchHit::new(item.title, item.snippet, item.link, "Google"))
            .collect();

        tracing::debug!("Google returned {} results", hits.len());
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_configured_requires_both_credentials() {
        let both = GoogleSearcher::new(Some("key".into()), Some("cx".into()), 10).unwrap();
        assert!(both.is_configured());

        let key_only = GoogleSearcher::new(Some("key".into()), None, 10).unwrap();
        assert!(!key_only.is_configured());

        let cx_only = GoogleSearcher::new(None, Some("cx".into()), 10).unwrap();
        assert!(!cx_only.is_configured());
    }

    #[tokio::test]
    async fn test_unconfigured_search_returns_empty() {
        let searcher = GoogleSearcher::new(None, None, 10).unwrap();
        let hits = searcher.search("qubit").await.unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_response_mapping() {
        let json = r#"{
            "items": [
                {"title": "Quantum gate", "snippet": "A quantum gate is ...", "link": "https://example.org/gate"},
                {"title": "Quantum circuit", "snippet": "A quantum circuit is ...", "link": "https://example.org/circuit"}
            ]
        }"#;

        let data: GoogleResponse = serde_json::from_str(json).unwrap();
        assert_eq!(data.items.len(), 2);
        assert_eq!(data.items[1].title, "Quantum circuit");
    }

    #[test]
    fn test_response_mapping_no_items() {
        let data: GoogleResponse = serde_json::from_str("{}").unwrap();
        assert!(data.items.is_empty());
    }
}
