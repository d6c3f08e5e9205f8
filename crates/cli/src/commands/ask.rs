//! Ask command handler.
//!
//! Runs the full pipeline: gather search hits, rank them by relevance,
//! synthesize a structured answer, print it.

use clap::Args;
use quanta_core::{config::AppConfig, AppError, AppResult};
use quanta_engine::{
    create_provider, Answer, AnswerSynthesizer, EmbeddingConfig, RelevanceIndex, DEFAULT_TOP_K,
};
use quanta_llm::create_client;
use quanta_sources::{QueryProcessor, SourceSet};

/// Ask a question and get a structured, attributed answer
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: String,

    /// Number of documents retrieved for synthesis
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    pub top_k: usize,

    /// Skip network sources; answer from curated content only
    #[arg(long)]
    pub offline: bool,

    /// Output the structured answer as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        let processor = QueryProcessor::new(config.keywords.clone());
        let query = processor.process(&self.question);

        if query.is_empty() {
            return Err(AppError::Config("Empty question".to_string()));
        }

        if !processor.is_quantum_related(&query) {
            tracing::warn!("Question does not match the quantum vocabulary");
            eprintln!("Note: this question doesn't look quantum-related; answers may be thin.");
        }

        // Gather raw documents from all configured sources
        let sources = SourceSet::from_config(config)?;
        let hits = sources.gather(&query, self.offline).await;

        // Rank them against the query
        let embedding_config = EmbeddingConfig::from_env();
        let provider = create_provider(&embedding_config).await?;
        let mut index = RelevanceIndex::new(provider);
        index.index(&hits).await?;
        let docs = index.retrieve(&query, self.top_k).await?;

        // Synthesize: generative when a Groq key is configured, template
        // otherwise
        let client = match config.groq_api_key.as_deref() {
            Some(key) => match create_client("groq", Some(key)) {
                Ok(client) => Some(client),
                Err(e) => {
                    tracing::warn!("Groq client init failed, using template path: {}", e);
                    None
                }
            },
            None => {
                tracing::debug!("No GROQ_API_KEY configured, using template path");
                None
            }
        };

        let synthesizer = AnswerSynthesizer::new(client, &config.model);
        let answer = synthesizer.generate_answer(&query, &docs).await;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&answer)?);
        } else {
            print_answer(&self.question, &answer);
        }

        Ok(())
    }
}

fn print_answer(question: &str, answer: &Answer) {
    println!("Q: {}\n", question);

    match &answer.main {
        Some(main) => {
            println!("{}", main.content);
            println!("  [{} - {}]", main.source, main.source_title);
        }
        None => {
            println!("No answer found. Try rephrasing the question.");
            return;
        }
    }

    if !answer.properties.is_empty() {
        println!("\nKey properties:");
        for prop in &answer.properties {
            println!("  - {}", prop.content);
            println!("    [{} - {}]", prop.source, prop.source_title);
        }
    }

    if !answer.sources.is_empty() {
        println!("\nSources:");
        for source in &answer.sources {
            println!("  {} ({}): {}", source.title, source.kind, source.link);
        }
    }

    println!(
        "\nConfidence: {:.2} | Generated by: {}",
        answer.confidence, answer.generated_by
    );
}
