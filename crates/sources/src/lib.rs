//! Source connectors for quantum content retrieval.
//!
//! Each connector turns an external search service into a uniform list of
//! [`SearchHit`]s. [`SourceSet`] fans a query out across all configured
//! connectors and flattens the results for downstream ranking.

pub mod arxiv;
pub mod google;
pub mod query;
pub mod serpapi;
pub mod wiki;

pub use arxiv::ArxivSearcher;
pub use google::GoogleSearcher;
pub use query::QueryProcessor;
pub use serpapi::SerpApiSearcher;
pub use wiki::WikiSearcher;

use quanta_core::{AppConfig, AppResult, SearchHit};

/// All configured source connectors, queried as a unit.
pub struct SourceSet {
    arxiv: ArxivSearcher,
    serpapi: SerpApiSearcher,
    google: GoogleSearcher,
    wiki: WikiSearcher,
    weights: Vec<(&'static str, f32)>,
}

impl SourceSet {
    /// Build connectors from the application configuration.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let search = &config.search;

        let arxiv = ArxivSearcher::new(search.arxiv_max_results, search.arxiv_categories.clone())?;
        let serpapi = SerpApiSearcher::new(config.serpapi_key.clone(), search.max_results)?;
        let google = GoogleSearcher::new(
            config.google_api_key.clone(),
            config.google_cse_id.clone(),
            search.max_results,
        )?;
        let wiki = WikiSearcher::new()?;

        // Keyed connectors run in descending fusion-weight order; the keyless
        // web connector always runs last.
        let mut weights = vec![
            ("arxiv", search.fusion_weights.arxiv),
            ("serpapi", search.fusion_weights.serpapi),
            ("google", search.fusion_weights.google),
        ];
        weights.sort_by(|a, b| b.1.total_cmp(&a.1));

        Ok(Self {
            arxiv,
            serpapi,
            google,
            wiki,
            weights,
        })
    }

    /// Query every connector and flatten the results.
    ///
    /// A failing connector is logged and skipped; only the keyless web
    /// connector decides the final fallback content. In offline mode no
    /// network request is made and only curated content is returned.
    pub async fn gather(&self, query: &str, offline: bool) -> Vec<SearchHit> {
        if offline {
            let hits = self.wiki.search_curated(query);
            tracing::info!("Gathered {} curated results (offline)", hits.len());
            return hits;
        }

        let mut hits = Vec::new();

        for &(name, _) in &self.weights {
            let result = match name {
                "arxiv" => self.arxiv.search(query).await,
                "serpapi" => self.serpapi.search(query).await,
                _ => self.google.search(query).await,
            };
            match result {
                Ok(found) => {
                    tracing::info!(source = name, count = found.len(), "Source queried");
                    hits.extend(found);
                }
                Err(e) => tracing::warn!(source = name, "Source failed: {}", e),
            }
        }

        match self.wiki.search_all(query).await {
            Ok(found) => {
                tracing::info!(source = "wiki", count = found.len(), "Source queried");
                hits.extend(found);
            }
            Err(e) => tracing::warn!(source = "wiki", "Source failed: {}", e),
        }

        tracing::info!("Gathered {} results total", hits.len());
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_orders_by_fusion_weight() {
        let config = AppConfig::default();
        let sources = SourceSet::from_config(&config).unwrap();

        let order: Vec<&str> = sources.weights.iter().map(|(n, _)| *n).collect();
        assert_eq!(order, vec!["arxiv", "serpapi", "google"]);
    }

    #[tokio::test]
    async fn test_offline_gather_uses_only_keyless_sources() {
        let config = AppConfig::default();
        let sources = SourceSet::from_config(&config).unwrap();

        let hits = sources.gather("what is a qubit", true).await;
        assert!(!hits.is_empty());
        assert!(hits
            .iter()
            .all(|h| h.source != "arXiv" && h.source != "SerpAPI" && h.source != "Google"));
    }
}
