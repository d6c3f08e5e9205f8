//! LLM integration crate for Quanta.
//!
//! This crate provides a provider-agnostic abstraction for interacting with
//! generative models through a unified trait-based interface.
//!
//! # Providers
//! - **Groq**: hosted OpenAI-compatible chat completions (default)
//!
//! # Example
//! ```no_run
//! use quanta_llm::{LlmClient, LlmRequest, providers::GroqClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GroqClient::new("gsk_...")?;
//! let request = LlmRequest::new("What is a qubit?", "llama-3.3-70b-versatile");
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;

// Re-export main types
pub use client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use factory::create_client;
pub use providers::GroqClient;
