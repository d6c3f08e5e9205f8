//! arXiv source connector.
//!
//! Queries the arXiv Atom API for papers related to the query, restricted
//! to the configured quantum-physics categories.
//! API: https://info.arxiv.org/help/api/user-manual.html

use quanta_core::{AppError, AppResult, SearchHit};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::time::Duration;

/// arXiv query endpoint.
const DEFAULT_BASE_URL: &str = "http://export.arxiv.org/api/query";

/// Per-request HTTP timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Searches arXiv for quantum mechanics and quantum computing papers.
pub struct ArxivSearcher {
    client: reqwest::Client,
    base_url: String,
    max_results: usize,
    categories: Vec<String>,
}

impl ArxivSearcher {
    /// Create a searcher limited to `max_results` papers in `categories`.
    pub fn new(max_results: usize, categories: Vec<String>) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Source(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            max_results,
            categories,
        })
    }

    /// Search arXiv for papers related to the query.
    pub async fn search(&self, query: &str) -> AppResult<Vec<SearchHit>> {
        let enhanced_query = self.enhance_query(query);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("search_query", enhanced_query.as_str()),
                ("start", "0"),
                ("max_results", &self.max_results.to_string()),
                ("sortBy", "relevance"),
                ("sortOrder", "descending"),
            ])
            .send()
            .await
            .map_err(|e| AppError::Source(format!("arXiv request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Source(format!(
                "arXiv API error ({})",
                response.status()
            )));
        }

        let xml = response
            .text()
            .await
            .map_err(|e| AppError::Source(format!("Failed to read arXiv response: {}", e)))?;

        let hits = parse_atom_feed(&xml);
        tracing::debug!("arXiv returned {} results", hits.len());
        Ok(hits)
    }

    /// Restrict the query to the configured categories.
    fn enhance_query(&self, query: &str) -> String {
        if self.categories.is_empty() {
            return format!("all:{}", query);
        }

        let cats = self
            .categories
            .iter()
            .map(|c| format!("cat:{}", c))
            .collect::<Vec<_>>()
            .join(" OR ");

        format!("all:{} AND ({})", query, cats)
    }
}

/// Parse an arXiv Atom feed into uniform search hits.
///
/// Malformed entries are skipped rather than failing the whole feed.
fn parse_atom_feed(xml: &str) -> Vec<SearchHit> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut hits = Vec::new();
    let mut in_entry = false;
    let mut field: Option<EntryField> = None;
    let mut title = String::new();
    let mut summary = String::new();
    let mut link = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"entry" => {
                    in_entry = true;
                    title.clear();
                    summary.clear();
                    link.clear();
                }
                b"title" if in_entry => field = Some(EntryField::Title),
                b"summary" if in_entry => field = Some(EntryField::Summary),
                b"id" if in_entry => field = Some(EntryField::Id),
                _ => field = None,
            },
            Ok(Event::Text(e)) => {
                if let (true, Some(f)) = (in_entry, field) {
                    if let Ok(text) = e.unescape() {
                        let target = match f {
                            EntryField::Title => &mut title,
                            EntryField::Summary => &mut summary,
                            EntryField::Id => &mut link,
                        };
                        target.push_str(&text);
                    }
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"entry" => {
                    in_entry = false;
                    if !title.is_empty() && !summary.is_empty() {
                        hits.push(SearchHit::new(
                            flatten(&title),
                            flatten(&summary),
                            link.trim(),
                            "arXiv",
                        ));
                    }
                }
                _ => field = None,
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                tracing::warn!("Error parsing arXiv feed: {}", e);
                break;
            }
            _ => {}
        }
    }

    hits
}

#[derive(Debug, Clone, Copy)]
enum EntryField {
    Title,
    Summary,
    Id,
}

/// Collapse newlines and runs of whitespace into single spaces.
fn flatten(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>ArXiv Query Results</title>
  <entry>
    <id>http://arxiv.org/abs/2301.00001v1</id>
    <title>Qubit coherence in
 superconducting circuits</title>
    <summary>We study decoherence mechanisms
 in transmon qubits.</summary>
    <author><name>A. Physicist</name></author>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/2301.00002v1</id>
    <title>Entanglement distillation protocols</title>
    <summary>A survey of entanglement distillation.</summary>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_atom_feed() {
        let hits = parse_atom_feed(SAMPLE_FEED);

        assert_eq!(hits.len(), 2);
        assert_eq!(
            hits[0].title,
            "Qubit coherence in superconducting circuits"
        );
        assert_eq!(
            hits[0].snippet,
            "We study decoherence mechanisms in transmon qubits."
        );
        assert_eq!(hits[0].link, "http://arxiv.org/abs/2301.00001v1");
        assert_eq!(hits[0].source, "arXiv");
        assert_eq!(hits[1].title, "Entanglement distillation protocols");
    }

    #[test]
    fn test_parse_empty_feed() {
        let hits = parse_atom_feed(
            r#"<?xml version="1.0"?><feed xmlns="http://www.w3.org/2005/Atom"></feed>"#,
        );
        assert!(hits.is_empty());
    }

    #[test]
    fn test_parse_garbage_does_not_panic() {
        let hits = parse_atom_feed("this is not xml <<<");
        assert!(hits.is_empty());
    }

    #[test]
    fn test_enhance_query_with_categories() {
        let searcher = ArxivSearcher::new(
            5,
            vec!["quant-ph".to_string(), "cond-mat.mes-hall".to_string()],
        )
        .unwrap();

        assert_eq!(
            searcher.enhance_query("qubit"),
            "all:qubit AND (cat:quant-ph OR cat:cond-mat.mes-hall)"
        );
    }

    #[test]
    fn test_enhance_query_without_categories() {
        let searcher = ArxivSearcher::new(5, vec![]).unwrap();
        assert_eq!(searcher.enhance_query("qubit"), "all:qubit");
    }
}
