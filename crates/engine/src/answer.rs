//! Structured answer schema.
//!
//! The synthesizer produces this shape on both the generative and the
//! template path; consumers never need to know which path ran.

use serde::{Deserialize, Serialize};

/// A passage of answer text attributed to the document it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributedPassage {
    pub content: String,
    pub source: String,
    pub source_link: String,
    pub source_title: String,
}

/// A source consulted while building the answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRef {
    pub title: String,
    pub link: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// The synthesized answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    /// The main definition; absent only when there were no documents at all
    pub main: Option<AttributedPassage>,

    /// Supporting properties in rank order
    pub properties: Vec<AttributedPassage>,

    /// Sources consulted, capped at 12
    pub sources: Vec<SourceRef>,

    /// Coarse indicator of the path taken, in [0, 1]
    pub confidence: f32,

    /// Which path produced the answer
    pub generated_by: String,
}

impl Answer {
    /// The well-formed answer returned when there was nothing to answer
    /// from. Never an error; the answer contract holds even with zero
    /// documents.
    pub fn empty() -> Self {
        Self {
            main: None,
            properties: Vec::new(),
            sources: Vec::new(),
            confidence: 0.0,
            generated_by: "template".to_string(),
        }
    }
}
