//! SerpAPI source connector.
//!
//! Queries the SerpAPI Google engine for quantum-related content, mapping
//! organic results and the optional knowledge-graph block.

use quanta_core::{AppError, AppResult, SearchHit};
use serde::Deserialize;
use std::time::Duration;

/// SerpAPI search endpoint.
const DEFAULT_BASE_URL: &str = "https://serpapi.com/search";

/// Per-request HTTP timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct SerpResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
    knowledge_graph: Option<KnowledgeGraph>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    link: String,
}

#[derive(Debug, Deserialize)]
struct KnowledgeGraph {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    website: String,
}

/// Searches the web through SerpAPI.
pub struct SerpApiSearcher {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    max_results: usize,
}

impl SerpApiSearcher {
    pub fn new(api_key: Option<String>, max_results: usize) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Source(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            max_results,
        })
    }

    /// Check if the API key is configured.
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    /// Search via SerpAPI. Returns an empty list when not configured.
    pub async fn search(&self, query: &str) -> AppResult<Vec<SearchHit>> {
        if !self.is_configured() {
            tracing::debug!("SerpAPI key not configured, skipping");
            return Ok(Vec::new());
        }

        // is_configured checked above
        let api_key = self.api_key.as_deref().unwrap_or_default();

        let enhanced_query = format!("{} quantum mechanics quantum computing", query);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", enhanced_query.as_str()),
                ("api_key", api_key),
                ("num", &self.max_results.to_string()),
                ("engine", "google"),
            ])
            .send()
            .await
            .map_err(|e| AppError::Source(format!("SerpAPI request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Source(format!(
                "SerpAPI error ({})",
                response.status()
            )));
        }

        let data: SerpResponse = response
            .json()
            .await
            .map_err(|e| AppError::Source(format!("Failed to parse SerpAPI response: {}", e)))?;

        let mut hits: Vec<SearchHit> = data
            .organic_results
            .into_iter()
            .map(|r| SearchHit::new(r.title, r.snippet, r.link, "SerpAPI"))
            .collect();

        if let Some(kg) = data.knowledge_graph {
            hits.push(SearchHit::new(
                kg.title,
                kg.description,
                kg.website,
                "SerpAPI-KnowledgeGraph",
            ));
        }

        tracing::debug!("SerpAPI returned {} results", hits.len());
        Ok(hits)
    }
}
