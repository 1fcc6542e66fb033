//! Wikilink extraction from note bodies.
//!
//! # Responsibility
//! - Find `[[target]]` and `[[target|alias]]` tokens in body text.
//!
//! # Invariants
//! - Targets are returned trimmed, in order of appearance, duplicates kept.
//! - Single-bracket links and unterminated brackets never match.

use once_cell::sync::Lazy;
use regex::Regex;

static WIKILINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[([^\]|]+)(?:\|[^\]]+)?\]\]").expect("valid wikilink regex"));

/// Extracts raw wikilink targets from body text.
///
/// The display alias after a `|` is discarded; only the target survives.
pub fn extract_wikilinks(body: &str) -> Vec<String> {
    WIKILINK_RE
        .captures_iter(body)
        .map(|caps| caps[1].trim().to_string())
        .collect()
}
