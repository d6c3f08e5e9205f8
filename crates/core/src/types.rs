//! Shared data types.

use serde::{Deserialize, Serialize};

/// A uniform search result record produced by every source connector.
///
/// This is the contract between the connectors and the retrieval engine:
/// the engine never needs to know which connector a hit came from beyond
/// the `source` label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// Result title
    pub title: String,

    /// Short snippet or summary text
    pub snippet: String,

    /// Canonical URL (used for attribution, never validated)
    pub link: String,

    /// Originating connector label (e.g. "Wikipedia", "arXiv")
    pub source: String,
}

impl SearchHit {
    pub fn new(
        title: impl Into<String>,
        snippet: impl Into<String>,
        link: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            snippet: snippet.into(),
            link: link.into(),
            source: source.into(),
        }
    }
}
