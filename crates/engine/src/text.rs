//! Small text helpers shared by the synthesizer and parser.

/// Truncate a string to at most `max` characters, respecting UTF-8
/// boundaries. Counting is per character, not per byte.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Collapse runs of whitespace (including newlines) into single spaces.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_shorter_than_max() {
        assert_eq!(truncate_chars("short", 10), "short");
    }

    #[test]
    fn test_truncate_at_max() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
    }

    #[test]
    fn test_truncate_multibyte() {
        // |ψ⟩ notation shows up in quantum snippets; must not split a char
        let text = "|ψ⟩ = α|0⟩ + β|1⟩";
        let truncated = truncate_chars(text, 5);
        assert_eq!(truncated, "|ψ⟩ =");
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(
            normalize_whitespace("a  b\nc\t d"),
            "a b c d"
        );
    }
}
