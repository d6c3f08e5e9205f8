//! Quanta CLI
//!
//! Main entry point for the quanta command-line tool.
//! Answers natural-language questions about quantum physics from live
//! search sources, with an optional Groq generative path.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AskCommand, SearchCommand};
use quanta_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// Quanta CLI - quantum physics Q&A over live search sources
#[derive(Parser, Debug)]
#[command(name = "quanta")]
#[command(about = "Ask quantum physics questions, answered from live sources", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, env = "QUANTA_CONFIG")]
    config: Option<PathBuf>,

    /// Groq model identifier
    #[arg(short, long, global = true, env = "QUANTA_MODEL")]
    model: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ask a question and get a structured, attributed answer
    Ask(AskCommand),

    /// Query the sources and show the ranked raw results
    Search(SearchCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from environment
    let config = AppConfig::load()?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.config,
        cli.model,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    )?;

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("Quanta CLI starting");
    tracing::debug!("Model: {}", config.model);

    let command_name = match &cli.command {
        Commands::Ask(_) => "ask",
        Commands::Search(_) => "search",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Search(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
