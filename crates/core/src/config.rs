//! Configuration management for Quanta.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Environment variables (API keys, model, log level)
//! - An optional YAML config file (quanta.yaml)
//! - Command-line flag overrides
//!
//! The fixed quantum vocabulary, arXiv categories and connector fusion
//! weights live here as explicit immutable data so tests can construct
//! configurations with alternate values instead of patching globals.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Default Groq model identifier.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Groq model identifier used on the generative path
    pub model: String,

    /// Groq API key; absence puts the synthesizer in fallback-only mode
    pub groq_api_key: Option<String>,

    /// SerpAPI key
    pub serpapi_key: Option<String>,

    /// Google Custom Search API key
    pub google_api_key: Option<String>,

    /// Google Custom Search engine id
    pub google_cse_id: Option<String>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Search/connector settings
    pub search: SearchConfig,

    /// Quantum topic vocabulary used for query gating
    pub keywords: Vec<String>,
}

/// Search and connector configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum results requested from each REST search connector
    pub max_results: usize,

    /// Maximum results requested from arXiv
    pub arxiv_max_results: usize,

    /// arXiv category filters appended to the search query
    pub arxiv_categories: Vec<String>,

    /// Relative connector weights; connectors are queried and listed
    /// in descending weight order
    pub fusion_weights: FusionWeights,
}

/// Per-connector fusion weights.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FusionWeights {
    pub arxiv: f32,
    pub serpapi: f32,
    pub google: f32,
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            arxiv: 0.4,
            serpapi: 0.35,
            google: 0.25,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: 10,
            arxiv_max_results: 5,
            arxiv_categories: vec![
                "quant-ph".to_string(),          // Quantum Physics
                "cond-mat.mes-hall".to_string(), // Mesoscale and Nanoscale Physics
                "physics.atom-ph".to_string(),   // Atomic Physics
            ],
            fusion_weights: FusionWeights::default(),
        }
    }
}

/// The default quantum topic vocabulary.
pub fn default_keywords() -> Vec<String> {
    [
        "quantum",
        "qubit",
        "entanglement",
        "superposition",
        "decoherence",
        "quantum computing",
        "quantum mechanics",
        "quantum algorithm",
        "quantum gate",
        "quantum circuit",
        "quantum error correction",
        "quantum cryptography",
        "quantum teleportation",
        "bell state",
        "bloch sphere",
        "hamiltonian",
        "schrodinger",
        "heisenberg",
        "pauli",
        "quantum annealing",
        "quantum supremacy",
        "qiskit",
        "quantum information",
        "quantum field theory",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// YAML config file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    model: Option<String>,
    search: Option<SearchFileConfig>,
    keywords: Option<Vec<String>>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SearchFileConfig {
    max_results: Option<usize>,
    arxiv_max_results: Option<usize>,
    arxiv_categories: Option<Vec<String>>,
    fusion_weights: Option<FusionWeights>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_file: None,
            model: DEFAULT_MODEL.to_string(),
            groq_api_key: None,
            serpapi_key: None,
            google_api_key: None,
            google_cse_id: None,
            log_level: None,
            verbose: false,
            no_color: false,
            search: SearchConfig::default(),
            keywords: default_keywords(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and defaults.
    ///
    /// Environment variables:
    /// - `GROQ_API_KEY`: Groq credential (generative path)
    /// - `SERPAPI_KEY`: SerpAPI credential
    /// - `GOOGLE_API_KEY` / `GOOGLE_CSE_ID`: Google Custom Search credentials
    /// - `QUANTA_MODEL`: Groq model identifier
    /// - `QUANTA_CONFIG`: Path to a YAML config file
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(config_file) = std::env::var("QUANTA_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        // YAML file first, so environment variables can override it
        let config_path = config
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("quanta.yaml"));

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        if let Ok(model) = std::env::var("QUANTA_MODEL") {
            config.model = model;
        }

        config.groq_api_key = std::env::var("GROQ_API_KEY").ok();
        config.serpapi_key = std::env::var("SERPAPI_KEY").ok();
        config.google_api_key = std::env::var("GOOGLE_API_KEY").ok();
        config.google_cse_id = std::env::var("GOOGLE_CSE_ID").ok();
        config.log_level = std::env::var("RUST_LOG").ok();

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(model) = config_file.model {
            result.model = model;
        }

        if let Some(keywords) = config_file.keywords {
            result.keywords = keywords;
        }

        if let Some(search) = config_file.search {
            if let Some(max_results) = search.max_results {
                result.search.max_results = max_results;
            }
            if let Some(arxiv_max) = search.arxiv_max_results {
                result.search.arxiv_max_results = arxiv_max;
            }
            if let Some(categories) = search.arxiv_categories {
                result.search.arxiv_categories = categories;
            }
            if let Some(weights) = search.fusion_weights {
                result.search.fusion_weights = weights;
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// A `--config` file merges first, so the remaining flags still take
    /// precedence over it. Unlike the implicit `quanta.yaml` lookup in
    /// `load()`, an explicitly passed file that cannot be read is an
    /// error.
    pub fn with_overrides(
        mut self,
        config_file: Option<PathBuf>,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> AppResult<Self> {
        if let Some(config_file) = config_file {
            self = self.merge_yaml(&config_file)?;
            self.config_file = Some(config_file);
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(config.groq_api_key.is_none());
        assert_eq!(config.search.max_results, 10);
        assert_eq!(config.search.arxiv_max_results, 5);
        assert!(config.keywords.contains(&"entanglement".to_string()));
    }

    #[test]
    fn test_fusion_weight_defaults() {
        let weights = FusionWeights::default();
        assert!(weights.arxiv > weights.serpapi);
        assert!(weights.serpapi > weights.google);
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default();
        let overridden = config
            .with_overrides(
                None,
                Some("llama-3.1-8b-instant".to_string()),
                None,
                true,
                false,
            )
            .unwrap();

        assert_eq!(overridden.model, "llama-3.1-8b-instant");
        assert!(overridden.verbose);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_override_keeps_explicit_log_level() {
        let config = AppConfig::default();
        let overridden = config
            .with_overrides(None, None, Some("trace".to_string()), true, false)
            .unwrap();
        assert_eq!(overridden.log_level, Some("trace".to_string()));
    }

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("quanta.yaml");
        std::fs::write(&path, contents).unwrap();
        (temp, path)
    }

    #[test]
    fn test_config_flag_merges_yaml_file() {
        let (_temp, path) = write_config(
            "model: llama-3.1-8b-instant\n\
             keywords:\n  - quantum\n  - qubit\n\
             search:\n  max_results: 4\n\
             logging:\n  level: debug\n",
        );

        let config = AppConfig::default()
            .with_overrides(Some(path.clone()), None, None, false, false)
            .unwrap();

        assert_eq!(config.model, "llama-3.1-8b-instant");
        assert_eq!(config.keywords, vec!["quantum", "qubit"]);
        assert_eq!(config.search.max_results, 4);
        assert_eq!(config.log_level, Some("debug".to_string()));
        assert_eq!(config.config_file, Some(path));
    }

    #[test]
    fn test_flags_take_precedence_over_config_file() {
        let (_temp, path) = write_config("model: llama-3.1-8b-instant\n");

        let config = AppConfig::default()
            .with_overrides(
                Some(path),
                Some("llama-3.3-70b-versatile".to_string()),
                Some("trace".to_string()),
                false,
                false,
            )
            .unwrap();

        assert_eq!(config.model, "llama-3.3-70b-versatile");
        assert_eq!(config.log_level, Some("trace".to_string()));
    }

    #[test]
    fn test_config_file_partial_fields_keep_defaults() {
        let (_temp, path) = write_config("search:\n  arxiv_max_results: 2\n");

        let config = AppConfig::default()
            .with_overrides(Some(path), None, None, false, false)
            .unwrap();

        assert_eq!(config.search.arxiv_max_results, 2);
        assert_eq!(config.search.max_results, 10);
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_missing_explicit_config_file_is_an_error() {
        let result = AppConfig::default().with_overrides(
            Some(PathBuf::from("/nonexistent/quanta.yaml")),
            None,
            None,
            false,
            false,
        );

        match result {
            Err(AppError::Config(msg)) => assert!(msg.contains("Failed to read config file")),
            other => panic!("Expected config error, got {:?}", other.map(|c| c.model)),
        }
    }

    #[test]
    fn test_malformed_config_file_is_an_error() {
        let (_temp, path) = write_config("model: [unclosed\n");

        let result = AppConfig::default().with_overrides(Some(path), None, None, false, false);
        match result {
            Err(AppError::Config(msg)) => assert!(msg.contains("Failed to parse config file")),
            other => panic!("Expected config error, got {:?}", other.map(|c| c.model)),
        }
    }
}
