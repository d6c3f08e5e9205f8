//! Embedding configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the embedding provider.
///
/// The same provider instance must embed both the indexed documents and
/// the query; mixing embedding spaces silently produces meaningless
/// similarity scores.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingConfig {
    /// Provider name: "trigram" or "ollama"
    pub provider: String,

    /// Model identifier (provider-specific)
    pub model: String,

    /// Embedding vector dimensions
    pub dimensions: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "trigram".to_string(),
            model: "trigram-v1".to_string(),
            dimensions: 384,
        }
    }
}

impl EmbeddingConfig {
    /// Build from environment variables, falling back to the offline
    /// trigram provider.
    ///
    /// - `QUANTA_EMBEDDING_PROVIDER`: "trigram" (default) or "ollama"
    /// - `QUANTA_EMBEDDING_MODEL`: model identifier
    pub fn from_env() -> Self {
        let provider = std::env::var("QUANTA_EMBEDDING_PROVIDER")
            .unwrap_or_else(|_| "trigram".to_string());

        match provider.as_str() {
            "ollama" => {
                let model = std::env::var("QUANTA_EMBEDDING_MODEL")
                    .unwrap_or_else(|_| "nomic-embed-text".to_string());
                Self {
                    provider,
                    model,
                    dimensions: 768,
                }
            }
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EmbeddingConfig::default();
        assert_eq!(config.provider, "trigram");
        assert_eq!(config.model, "trigram-v1");
        assert_eq!(config.dimensions, 384);
    }
}
