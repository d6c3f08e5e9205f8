//! Query sanitization and topic gating.
//!
//! The vocabulary is injected at construction so tests can run with
//! alternate keyword lists.

/// Processes and validates user queries.
#[derive(Debug, Clone)]
pub struct QueryProcessor {
    keywords: Vec<String>,
}

impl QueryProcessor {
    /// Create a processor with the given topic vocabulary.
    pub fn new(keywords: Vec<String>) -> Self {
        Self { keywords }
    }

    /// Clean the query: collapse whitespace and strip special characters,
    /// keeping word characters, `?` and `-`.
    pub fn process(&self, query: &str) -> String {
        let collapsed = query.split_whitespace().collect::<Vec<_>>().join(" ");

        collapsed
            .chars()
            .filter(|c| c.is_alphanumeric() || c.is_whitespace() || matches!(c, '_' | '?' | '-'))
            .collect::<String>()
            .trim()
            .to_string()
    }

    /// Check whether the query touches any known quantum topic.
    pub fn is_quantum_related(&self, query: &str) -> bool {
        let query_lower = query.to_lowercase();
        self.keywords.iter().any(|kw| query_lower.contains(kw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quanta_core::config::default_keywords;

    #[test]
    fn test_process_collapses_whitespace() {
        let processor = QueryProcessor::new(default_keywords());
        assert_eq!(
            processor.process("  what   is\ta qubit?  "),
            "what is a qubit?"
        );
    }

    #[test]
    fn test_process_strips_special_characters() {
        let processor = QueryProcessor::new(default_keywords());
        assert_eq!(
            processor.process("what is \"entanglement\"!? (really)"),
            "what is entanglement? really"
        );
    }

    #[test]
    fn test_process_keeps_hyphen_and_underscore() {
        let processor = QueryProcessor::new(default_keywords());
        assert_eq!(
            processor.process("spin-up vs spin_down"),
            "spin-up vs spin_down"
        );
    }

    #[test]
    fn test_is_quantum_related() {
        let processor = QueryProcessor::new(default_keywords());
        assert!(processor.is_quantum_related("What is a Qubit?"));
        assert!(processor.is_quantum_related("explain the bloch sphere"));
        assert!(!processor.is_quantum_related("how do I bake bread"));
    }

    #[test]
    fn test_alternate_vocabulary() {
        let processor = QueryProcessor::new(vec!["bread".to_string()]);
        assert!(processor.is_quantum_related("how do I bake bread"));
        assert!(!processor.is_quantum_related("what is a qubit"));
    }
}
