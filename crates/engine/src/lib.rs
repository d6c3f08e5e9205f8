//! Retrieval and answer synthesis for Quanta.
//!
//! The pipeline: search hits are embedded into the [`RelevanceIndex`],
//! the top-k documents by cosine similarity are handed to the
//! [`AnswerSynthesizer`], and the result is a structured [`Answer`]
//! regardless of whether the generative or the template path ran.

pub mod answer;
pub mod embeddings;
pub mod index;
pub mod parser;
pub mod synthesizer;
pub mod text;

pub use answer::{Answer, AttributedPassage, SourceRef};
pub use embeddings::{create_provider, EmbeddingConfig, EmbeddingProvider};
pub use index::{RelevanceIndex, RetrievedDocument, DEFAULT_TOP_K};
pub use synthesizer::AnswerSynthesizer;
