//! Answer synthesis.
//!
//! Produces one structured answer per query from the retrieved documents.
//! With an LLM client the generative path runs first and any failure
//! (call error, malformed or empty response) drops to the deterministic
//! template path for that call only. Without a client the template path
//! always runs. Errors from the generative path are logged, never
//! surfaced to the caller.

use crate::answer::{Answer, AttributedPassage, SourceRef};
use crate::index::RetrievedDocument;
use crate::parser::parse_answer;
use crate::text::truncate_chars;
use quanta_llm::{LlmClient, LlmRequest};
use std::sync::Arc;

/// Documents rendered into the generative context block.
const CONTEXT_DOCS: usize = 6;

/// Character cap per document in the context block.
const CONTEXT_DOC_CAP: usize = 600;

/// Character cap for the template main passage.
const TEMPLATE_MAIN_CAP: usize = 800;

/// Character cap for each template property.
const TEMPLATE_PROPERTY_CAP: usize = 600;

/// Documents scanned for template properties.
const PROPERTY_SCAN_DOCS: usize = 10;

/// Maximum template properties.
const MAX_PROPERTIES: usize = 6;

/// A source type may contribute a second property only while fewer than
/// this many have been collected.
const PROPERTY_GRACE_THRESHOLD: usize = 4;

/// Minimum length for a template property.
const MIN_PROPERTY_LEN: usize = 60;

/// Sources listed on the answer, at most.
const MAX_SOURCES: usize = 12;

const SYSTEM_PROMPT: &str = "You are a quantum physics expert.";

/// Confidence reported for generative answers.
const GENERATIVE_CONFIDENCE: f32 = 0.92;

/// Confidence reported for template answers.
const TEMPLATE_CONFIDENCE: f32 = 0.72;

/// Builds structured answers from retrieved documents.
///
/// The path is chosen once at construction: with a client the instance is
/// generative-enabled, without one it is fallback-only. A generative
/// failure never downgrades the instance.
pub struct AnswerSynthesizer {
    client: Option<Arc<dyn LlmClient>>,
    model: String,
}

impl AnswerSynthesizer {
    pub fn new(client: Option<Arc<dyn LlmClient>>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Whether the generative path is available.
    pub fn is_generative(&self) -> bool {
        self.client.is_some()
    }

    /// Produce one structured answer for the query.
    pub async fn generate_answer(&self, query: &str, docs: &[RetrievedDocument]) -> Answer {
        match &self.client {
            Some(client) => match self.generate_with_llm(client.as_ref(), query, docs).await {
                Ok(answer) => answer,
                Err(e) => {
                    tracing::warn!("Generative path failed, using template: {}", e);
                    self.generate_template(docs)
                }
            },
            None => self.generate_template(docs),
        }
    }

    /// Generative path: render a context block, prompt the model, parse
    /// the free text into the structured schema.
    async fn generate_with_llm(
        &self,
        client: &dyn LlmClient,
        query: &str,
        docs: &[RetrievedDocument],
    ) -> Result<Answer, String> {
        let mut context_parts = Vec::new();
        let mut sources = Vec::new();

        for (i, doc) in docs.iter().take(CONTEXT_DOCS).enumerate() {
            context_parts.push(format!(
                "[Source {} - {}]\n{}",
                i + 1,
                doc.metadata.source,
                truncate_chars(&doc.text, CONTEXT_DOC_CAP)
            ));
            sources.push(SourceRef {
                title: doc.metadata.title.clone(),
                link: doc.metadata.link.clone(),
                kind: doc.metadata.source.clone(),
            });
        }

        let context = context_parts.join("\n\n");
        let prompt = build_prompt(query, &context);

        tracing::info!("Generating answer with {}", self.model);

        let request = LlmRequest::new(prompt, &self.model)
            .with_system(SYSTEM_PROMPT)
            .with_temperature(0.7)
            .with_top_p(0.9)
            .with_max_tokens(1500);

        let response = client
            .complete(&request)
            .await
            .map_err(|e| e.to_string())?;

        if !response.has_text() {
            return Err("empty answer from model".to_string());
        }

        let parsed = parse_answer(response.text(), &sources);
        tracing::info!("Answer generated ({} chars)", response.text().len());

        Ok(Answer {
            main: Some(parsed.main),
            properties: parsed.properties,
            sources,
            confidence: GENERATIVE_CONFIDENCE,
            generated_by: format!("Groq AI ({})", self.model),
        })
    }

    /// Deterministic path: extract the answer from the top-ranked
    /// documents without a model.
    fn generate_template(&self, docs: &[RetrievedDocument]) -> Answer {
        let Some(best) = docs.first() else {
            return Answer::empty();
        };

        let main = AttributedPassage {
            content: truncate_chars(&best.text, TEMPLATE_MAIN_CAP).to_string(),
            source: best.metadata.source.clone(),
            source_link: best.metadata.link.clone(),
            source_title: best.metadata.title.clone(),
        };

        let mut properties = Vec::new();
        let mut sources_seen = std::collections::HashSet::new();

        // The top document is the main passage; properties come from the rest
        for doc in docs.iter().take(PROPERTY_SCAN_DOCS).skip(1) {
            if properties.len() >= MAX_PROPERTIES {
                break;
            }

            let source_type = &doc.metadata.source;
            if sources_seen.contains(source_type) && properties.len() >= PROPERTY_GRACE_THRESHOLD {
                continue;
            }

            let mut prop_text = doc
                .text
                .split(". ")
                .take(3)
                .collect::<Vec<_>>()
                .join(". ");
            if !prop_text.ends_with('.') {
                prop_text.push('.');
            }

            if prop_text.chars().count() > MIN_PROPERTY_LEN {
                properties.push(AttributedPassage {
                    content: truncate_chars(&prop_text, TEMPLATE_PROPERTY_CAP).to_string(),
                    source: source_type.clone(),
                    source_link: doc.metadata.link.clone(),
                    source_title: doc.metadata.title.clone(),
                });
                sources_seen.insert(source_type.clone());
            }
        }

        let sources = docs
            .iter()
            .take(MAX_SOURCES)
            .map(|doc| SourceRef {
                title: doc.metadata.title.clone(),
                link: doc.metadata.link.clone(),
                kind: doc.metadata.source.clone(),
            })
            .collect();

        Answer {
            main: Some(main),
            properties,
            sources,
            confidence: TEMPLATE_CONFIDENCE,
            generated_by: "template (fallback)".to_string(),
        }
    }
}

fn build_prompt(query: &str, context: &str) -> String {
    format!(
        "You are an expert quantum computing educator.\n\n\
Question: {}\n\n\
Sources:\n{}\n\n\
Provide a comprehensive answer with:\n\n\
MAIN DEFINITION:\n\
[2-3 clear sentences]\n\n\
KEY PROPERTIES:\n\
- Property 1: [detailed explanation]\n\
- Property 2: [detailed explanation]\n\
- Property 3: [detailed explanation]\n\
- Property 4: [detailed explanation]\n\n\
Answer:",
        query, context
    )
}
