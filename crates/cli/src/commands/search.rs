//! Search command handler.
//!
//! Queries the sources and prints the ranked raw results without
//! synthesizing an answer. Useful for inspecting what the ask pipeline
//! would work from.

use clap::Args;
use quanta_core::{config::AppConfig, AppError, AppResult};
use quanta_engine::{create_provider, EmbeddingConfig, RelevanceIndex};
use quanta_sources::{QueryProcessor, SourceSet};

/// Query the sources and show the ranked raw results
#[derive(Args, Debug)]
pub struct SearchCommand {
    /// The search query
    pub query: String,

    /// Number of results to show
    #[arg(long, default_value_t = 10)]
    pub limit: usize,

    /// Skip network sources; search curated content only
    #[arg(long)]
    pub offline: bool,
}

impl SearchCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing search command");

        let processor = QueryProcessor::new(config.keywords.clone());
        let query = processor.process(&self.query);

        if query.is_empty() {
            return Err(AppError::Config("Empty query".to_string()));
        }

        let sources = SourceSet::from_config(config)?;
        let hits = sources.gather(&query, self.offline).await;

        if hits.is_empty() {
            println!("No results.");
            return Ok(());
        }

        let embedding_config = EmbeddingConfig::from_env();
        let provider = create_provider(&embedding_config).await?;
        let mut index = RelevanceIndex::new(provider);
        index.index(&hits).await?;
        let docs = index.retrieve(&query, self.limit).await?;

        for (i, doc) in docs.iter().enumerate() {
            println!(
                "{:2}. [{:.3}] {} ({})",
                i + 1,
                doc.similarity,
                doc.metadata.title,
                doc.metadata.source
            );
            println!("     {}", doc.metadata.link);
        }

        Ok(())
    }
}
