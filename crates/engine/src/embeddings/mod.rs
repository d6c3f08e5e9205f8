//! Provider-agnostic embedding generation.
//!
//! The relevance index embeds documents and queries through one
//! [`EmbeddingProvider`] instance; the factory picks the implementation
//! from an [`EmbeddingConfig`].

pub mod config;
pub mod provider;
pub mod providers;

pub use config::EmbeddingConfig;
pub use provider::{create_provider, EmbeddingProvider};
