//! LLM provider factory.
//!
//! Provides a single entry point for creating LLM clients from a provider
//! name and credential.

use crate::client::LlmClient;
use crate::providers::GroqClient;
use quanta_core::{AppError, AppResult};
use std::sync::Arc;

/// Create an LLM client based on the provider name.
///
/// # Arguments
/// * `provider` - Provider identifier (currently only "groq")
/// * `api_key` - API key for providers that require one
///
/// # Errors
/// Returns an error if the provider is unknown, the required credential is
/// missing, or client initialization fails.
pub fn create_client(provider: &str, api_key: Option<&str>) -> AppResult<Arc<dyn LlmClient>> {
    match provider.to_lowercase().as_str() {
        "groq" => {
            let api_key = api_key
                .ok_or_else(|| AppError::Llm("Groq provider requires an API key".to_string()))?;
            let client = GroqClient::new(api_key)?;
            Ok(Arc::new(client))
        }
        _ => Err(AppError::Llm(format!("Unknown provider: {}", provider))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_groq_client() {
        let client = create_client("groq", Some("gsk_test"));
        assert!(client.is_ok());
    }

    #[test]
    fn test_groq_requires_api_key() {
        match create_client("groq", None) {
            Err(err) => assert!(err.to_string().contains("requires an API key")),
            Ok(_) => panic!("Expected error for Groq without API key"),
        }
    }

    #[test]
    fn test_unknown_provider() {
        match create_client("unknown", None) {
            Err(err) => assert!(err.to_string().contains("Unknown provider")),
            Ok(_) => panic!("Expected error for unknown provider"),
        }
    }
}
