//! In-memory relevance index.
//!
//! Holds one embedding per document and answers top-k cosine-similarity
//! queries. Contents are fully replaced on each indexing call; the index
//! lives for one query-answering session and is then reset or dropped.

use crate::embeddings::EmbeddingProvider;
use quanta_core::{AppResult, SearchHit};
use std::sync::Arc;

/// Default number of documents returned by retrieval.
pub const DEFAULT_TOP_K: usize = 8;

/// Attribution carried with every document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocMetadata {
    pub title: String,
    pub link: String,
    pub source: String,
}

/// One retrievable unit of text.
#[derive(Debug, Clone)]
pub struct Document {
    /// Position in the current indexing session
    pub id: usize,
    /// Title and snippet joined; used for both embedding and display
    pub text: String,
    pub metadata: DocMetadata,
}

/// A document returned by retrieval, with its similarity to the query.
#[derive(Debug, Clone)]
pub struct RetrievedDocument {
    pub text: String,
    pub metadata: DocMetadata,
    pub similarity: f32,
}

/// Embedding-backed nearest-neighbor index over search hits.
///
/// Documents and the query must be embedded by the same provider
/// instance; mixed embedding spaces produce meaningless scores without
/// any error. Not safe for concurrent index/retrieve on one instance.
pub struct RelevanceIndex {
    provider: Arc<dyn EmbeddingProvider>,
    documents: Vec<Document>,
    embeddings: Vec<Vec<f32>>,
}

impl RelevanceIndex {
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            provider,
            documents: Vec::new(),
            embeddings: Vec::new(),
        }
    }

    /// Replace the index contents with the given hits.
    ///
    /// An empty input is a no-op, not an error, and leaves previous
    /// contents in place. On embedding failure the error propagates and
    /// the previous contents are kept.
    pub async fn index(&mut self, hits: &[SearchHit]) -> AppResult<()> {
        if hits.is_empty() {
            return Ok(());
        }

        let texts: Vec<String> = hits
            .iter()
            .map(|hit| format!("{}. {}", hit.title, hit.snippet))
            .collect();

        // Embed before replacing, so a failure leaves the index intact
        let embeddings = self.provider.embed_batch(&texts).await?;

        self.documents = hits
            .iter()
            .zip(texts)
            .enumerate()
            .map(|(id, (hit, text))| Document {
                id,
                text,
                metadata: DocMetadata {
                    title: hit.title.clone(),
                    link: hit.link.clone(),
                    source: hit.source.clone(),
                },
            })
            .collect();
        self.embeddings = embeddings;

        tracing::info!("Indexed {} documents", self.documents.len());
        Ok(())
    }

    /// Return the `top_k` most similar documents, descending by cosine
    /// similarity. Ties keep insertion order. An empty index yields an
    /// empty list.
    pub async fn retrieve(&self, query: &str, top_k: usize) -> AppResult<Vec<RetrievedDocument>> {
        if self.documents.is_empty() {
            return Ok(Vec::new());
        }

        let query_embedding = self.provider.embed(query).await?;

        let mut scored: Vec<(usize, f32)> = self
            .embeddings
            .iter()
            .enumerate()
            .map(|(i, emb)| (i, cosine_similarity(&query_embedding, emb)))
            .collect();

        // Stable sort keeps insertion order among equal scores
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(top_k);

        let retrieved: Vec<RetrievedDocument> = scored
            .into_iter()
            .map(|(i, similarity)| RetrievedDocument {
                text: self.documents[i].text.clone(),
                metadata: self.documents[i].metadata.clone(),
                similarity,
            })
            .collect();

        tracing::debug!("Retrieved {} relevant documents", retrieved.len());
        Ok(retrieved)
    }

    /// Clear all documents and embeddings.
    pub fn reset(&mut self) {
        self.documents.clear();
        self.embeddings.clear();
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Cosine similarity of two vectors; 0.0 when either has zero norm.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::providers::TrigramProvider;

    fn test_index() -> RelevanceIndex {
        RelevanceIndex::new(Arc::new(TrigramProvider::new(384)))
    }

    fn hit(title: &str, snippet: &str) -> SearchHit {
        SearchHit::new(title, snippet, "https://example.org", "Test")
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[tokio::test]
    async fn test_retrieve_returns_at_most_k_sorted() {
        let mut index = test_index();
        let hits: Vec<SearchHit> = (0..12)
            .map(|i| hit(&format!("Topic {}", i), "quantum computing basics"))
            .collect();
        index.index(&hits).await.unwrap();

        let results = index.retrieve("quantum computing", 8).await.unwrap();
        assert!(results.len() <= 8);
        for pair in results.windows(2) {
            assert!(pair[0].similarity >= pair[1].similarity);
        }
    }

    #[tokio::test]
    async fn test_retrieve_ranks_relevant_first() {
        let mut index = test_index();
        index
            .index(&[
                hit("Sourdough bread", "A bread made by fermentation of dough"),
                hit("Qubit", "A qubit is the basic unit of quantum information"),
            ])
            .await
            .unwrap();

        let results = index.retrieve("what is a qubit", 2).await.unwrap();
        assert_eq!(results[0].metadata.title, "Qubit");
    }

    #[tokio::test]
    async fn test_index_replaces_previous_contents() {
        let mut index = test_index();
        index
            .index(&[hit("A", "first batch"), hit("B", "first batch")])
            .await
            .unwrap();
        index.index(&[hit("C", "second batch")]).await.unwrap();

        assert_eq!(index.len(), 1);
        let results = index.retrieve("batch", 10).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].metadata.title, "C");
    }

    #[tokio::test]
    async fn test_index_empty_input_is_noop() {
        let mut index = test_index();
        index.index(&[hit("A", "kept")]).await.unwrap();
        index.index(&[]).await.unwrap();
        assert_eq!(index.len(), 1);
    }

    #[tokio::test]
    async fn test_retrieve_on_empty_index() {
        let index = test_index();
        let results = index.retrieve("anything", 8).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_tie_scores_keep_insertion_order() {
        let mut index = test_index();
        // Identical text gives identical embeddings, hence tied scores
        index
            .index(&[
                SearchHit::new("Tie", "quantum entanglement", "https://a.example", "Test"),
                SearchHit::new("Tie", "quantum entanglement", "https://b.example", "Test"),
            ])
            .await
            .unwrap();

        let results = index.retrieve("entanglement", 2).await.unwrap();
        assert_eq!(results[0].similarity, results[1].similarity);
        assert_eq!(results[0].metadata.link, "https://a.example");
        assert_eq!(results[1].metadata.link, "https://b.example");
    }

    #[tokio::test]
    async fn test_reset_clears_index() {
        let mut index = test_index();
        index.index(&[hit("A", "something")]).await.unwrap();
        index.reset();

        assert!(index.is_empty());
        let results = index.retrieve("something", 8).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_document_text_joins_title_and_snippet() {
        let mut index = test_index();
        index
            .index(&[hit("Qubit", "basic unit of quantum information")])
            .await
            .unwrap();

        let results = index.retrieve("qubit", 1).await.unwrap();
        assert_eq!(results[0].text, "Qubit. basic unit of quantum information");
    }
}
