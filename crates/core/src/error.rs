//! Error types for Quanta.
//!
//! This module defines a unified error enum that covers all error categories
//! in the application: configuration, I/O, LLM, source connectors, and the
//! retrieval engine.

use thiserror::Error;

/// Unified error type for Quanta.
///
/// All fallible functions in the workspace return `Result<T, AppError>`.
/// Non-test code never panics; errors are represented and propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// LLM provider errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// Source connector errors (network, malformed payloads)
    #[error("Source error: {0}")]
    Source(String),

    /// Retrieval engine errors (embedding, indexing)
    #[error("Engine error: {0}")]
    Engine(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
