//! Free-text answer parsing.
//!
//! Turns a generative model's answer into the same structured schema the
//! template path produces, tolerating format deviations with
//! progressively looser extraction. Never fails; worst case is a
//! truncated-prefix main passage with no properties.

use crate::answer::{AttributedPassage, SourceRef};
use crate::text::{normalize_whitespace, truncate_chars};
use regex::Regex;
use std::sync::OnceLock;

/// Character cap for the main passage.
const MAIN_CONTENT_CAP: usize = 900;

/// Character cap for the heading-less main fallback.
const MAIN_FALLBACK_CAP: usize = 700;

/// Character cap for each property.
const PROPERTY_CONTENT_CAP: usize = 600;

/// Maximum bullets considered.
const MAX_BULLETS: usize = 8;

/// Minimum normalized length for a bullet to count as a property.
const MIN_PROPERTY_LEN: usize = 50;

/// Minimum length for a fallback paragraph to count as a property.
const MIN_PARAGRAPH_LEN: usize = 60;

fn main_heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)MAIN DEFINITION:?[ \t]*").expect("valid regex"))
}

fn properties_heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)KEY (?:PROPERTIES|CONCEPTS):?[ \t]*").expect("valid regex"))
}

fn labeled_bullet_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?im)^[ \t]*[-•][ \t]*Property[ \t]*\d+:?[ \t]*").expect("valid regex")
    })
}

fn plain_bullet_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^[ \t]*[-•][ \t]*").expect("valid regex"))
}

/// The main/properties pair extracted from free text; the synthesizer
/// merges it with sources, confidence and provenance.
#[derive(Debug, Clone)]
pub struct ParsedAnswer {
    pub main: AttributedPassage,
    pub properties: Vec<AttributedPassage>,
}

/// Parse a model answer into a main passage and attributed properties.
///
/// Property `i` is attributed to `sources[i]`, clamped to the last source
/// when the bullets outnumber the sources; with no sources at all a
/// synthetic "Generated" placeholder is used.
pub fn parse_answer(answer_text: &str, sources: &[SourceRef]) -> ParsedAnswer {
    // Emphasis markup confuses the heading and bullet patterns
    let clean = answer_text.replace("**", "");

    let main_content = extract_main(&clean);
    let mut properties = extract_properties(&clean, sources);

    if properties.is_empty() {
        properties = paragraph_fallback(&clean, sources);
    }

    let main = match sources.first() {
        Some(source) => AttributedPassage {
            content: truncate_chars(&main_content, MAIN_CONTENT_CAP).to_string(),
            source: source.kind.clone(),
            source_link: source.link.clone(),
            source_title: source.title.clone(),
        },
        None => AttributedPassage {
            content: truncate_chars(&main_content, MAIN_CONTENT_CAP).to_string(),
            source: "Generated".to_string(),
            source_link: "#".to_string(),
            source_title: "Answer".to_string(),
        },
    };

    ParsedAnswer { main, properties }
}

/// The text between the MAIN DEFINITION heading and the properties
/// heading (or end of text); without the heading, the first paragraph or
/// a truncated prefix.
fn extract_main(clean: &str) -> String {
    if let Some(m) = main_heading_re().find(clean) {
        let after = &clean[m.end()..];
        let end = properties_heading_re()
            .find(after)
            .map(|h| h.start())
            .unwrap_or(after.len());
        return after[..end].trim().to_string();
    }

    let mut paragraphs = clean.split("\n\n").map(str::trim).filter(|p| !p.is_empty());
    match paragraphs.next() {
        Some(first) => first.to_string(),
        None => truncate_chars(clean, MAIN_FALLBACK_CAP).to_string(),
    }
}

/// Bullets from the region after the properties heading.
fn extract_properties(clean: &str, sources: &[SourceRef]) -> Vec<AttributedPassage> {
    let Some(heading) = properties_heading_re().find(clean) else {
        return Vec::new();
    };
    let region = &clean[heading.end()..];

    // Labeled bullets may span paragraphs; plain ones end at a blank line
    let mut bullets = bullet_contents(region, labeled_bullet_re(), "\n\nProperty");
    if bullets.is_empty() {
        bullets = bullet_contents(region, plain_bullet_re(), "\n\n");
    }

    let mut properties = Vec::new();
    for (i, bullet) in bullets.iter().take(MAX_BULLETS).enumerate() {
        let normalized = normalize_whitespace(bullet);
        if normalized.chars().count() <= MIN_PROPERTY_LEN {
            continue;
        }

        let source = attribution(sources, i, "AI Generated");
        properties.push(AttributedPassage {
            content: truncate_chars(&normalized, PROPERTY_CONTENT_CAP).to_string(),
            source: source.kind,
            source_link: source.link,
            source_title: source.title,
        });
    }

    properties
}

/// Slice the text following each bullet marker, up to the next marker or
/// the given terminator.
fn bullet_contents(region: &str, marker: &Regex, terminator: &str) -> Vec<String> {
    let markers: Vec<(usize, usize)> = marker
        .find_iter(region)
        .map(|m| (m.start(), m.end()))
        .collect();

    markers
        .iter()
        .enumerate()
        .map(|(i, &(_, end))| {
            let slice_end = markers
                .get(i + 1)
                .map(|&(next_start, _)| next_start)
                .unwrap_or(region.len());
            let mut slice = &region[end..slice_end];
            // A bullet of any kind ends the capture, labeled or not
            let cut = [terminator, "\n-", "\n•"]
                .iter()
                .filter_map(|t| slice.find(t))
                .min()
                .unwrap_or(slice.len());
            slice = &slice[..cut];
            slice.trim().to_string()
        })
        .filter(|s| !s.is_empty())
        .collect()
}

/// Last resort: treat the 2nd through 7th paragraphs of the whole text as
/// properties.
fn paragraph_fallback(clean: &str, sources: &[SourceRef]) -> Vec<AttributedPassage> {
    let paragraphs: Vec<&str> = clean
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let mut properties = Vec::new();
    for (i, para) in paragraphs.iter().skip(1).take(6).enumerate() {
        if para.chars().count() <= MIN_PARAGRAPH_LEN
            || para.to_uppercase().starts_with("MAIN DEFINITION")
        {
            continue;
        }

        let source = attribution(sources, i, "AI");
        properties.push(AttributedPassage {
            content: truncate_chars(para, PROPERTY_CONTENT_CAP).to_string(),
            source: source.kind,
            source_link: source.link,
            source_title: source.title,
        });
    }

    properties
}

/// `sources[i]` clamped to the last source, or a synthetic placeholder.
fn attribution(sources: &[SourceRef], i: usize, placeholder_title: &str) -> SourceRef {
    match sources.get(i.min(sources.len().saturating_sub(1))) {
        Some(source) => source.clone(),
        None => SourceRef {
            title: placeholder_title.to_string(),
            link: "#".to_string(),
            kind: "Generated".to_string(),
        },
    }
}
