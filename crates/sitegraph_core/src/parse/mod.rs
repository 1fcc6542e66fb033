//! Raw-text parsing for content files.
//!
//! # Responsibility
//! - Split documents into frontmatter fields and body.
//! - Extract wikilink targets from body text.
//!
//! # Invariants
//! - Parsing is pure: no I/O, no logging side effects on the data path.
//! - Malformed frontmatter degrades to "no fields", never to an error.

pub mod frontmatter;
pub mod wikilink;

/// Counts whitespace-delimited tokens in body text.
pub fn count_words(body: &str) -> usize {
    body.split_whitespace().count()
}
