//! Flat frontmatter extraction.
//!
//! # Responsibility
//! - Split a raw document into a metadata block and body.
//! - Parse scalar fields plus the array-valued `tags` field.
//!
//! # Invariants
//! - A block exists only when the first line is exactly `---` and a later
//!   line closes it; an unclosed opener yields zero fields and leaves the
//!   whole input as body.
//! - Non-`tags` values stay raw trimmed strings; callers coerce further.
//!
//! This is intentionally not a YAML parser: the supported surface is one
//! flat `key: value` block with bracketed or comma-separated tag lists.

use std::collections::BTreeMap;

/// Parsed value of a single frontmatter field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Raw trimmed string, wrapping quotes removed.
    Scalar(String),
    /// Ordered string sequence; currently only produced for `tags`.
    List(Vec<String>),
}

impl FieldValue {
    /// Returns the scalar text, or `None` for list-shaped values.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(value) => Some(value),
            Self::List(_) => None,
        }
    }

    /// Returns the list items, or `None` for scalar-shaped values.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::Scalar(_) => None,
            Self::List(items) => Some(items),
        }
    }
}

/// Result of splitting one raw document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frontmatter {
    /// Field name to parsed value; empty when no block was found.
    pub fields: BTreeMap<String, FieldValue>,
    /// Document content after the closing delimiter (or the entire input).
    pub body: String,
}

const DELIMITER: &str = "---";
const TAGS_FIELD: &str = "tags";

/// Splits raw file text into frontmatter fields and body.
///
/// Interior lines are split at the first colon; lines without one are
/// ignored. A `tags` value starting with `[` is parsed as a strict JSON
/// string array first, falling back to comma-splitting with quote
/// stripping when that fails.
pub fn parse_frontmatter(raw: &str) -> Frontmatter {
    let lines: Vec<&str> = raw.split('\n').collect();

    if lines.first().map(|line| line.trim()) != Some(DELIMITER) {
        return Frontmatter {
            fields: BTreeMap::new(),
            body: raw.to_string(),
        };
    }

    let Some(close) = lines
        .iter()
        .skip(1)
        .position(|line| line.trim() == DELIMITER)
        .map(|offset| offset + 1)
    else {
        // Unclosed block: treat nothing as consumed rather than swallowing
        // the rest of the document into metadata.
        return Frontmatter {
            fields: BTreeMap::new(),
            body: raw.to_string(),
        };
    };

    let mut fields = BTreeMap::new();
    for line in &lines[1..close] {
        let Some(colon) = line.find(':') else {
            continue;
        };
        if colon == 0 {
            continue;
        }

        let key = line[..colon].trim();
        let value = strip_wrapping_quotes(line[colon + 1..].trim());

        if key == TAGS_FIELD && !value.is_empty() {
            fields.insert(key.to_string(), FieldValue::List(parse_tags_value(value)));
        } else {
            fields.insert(key.to_string(), FieldValue::Scalar(value.to_string()));
        }
    }

    Frontmatter {
        fields,
        body: lines[close + 1..].join("\n"),
    }
}

/// Removes one layer of matching single or double wrapping quotes.
fn strip_wrapping_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Parses a non-empty `tags` value into an ordered string list.
fn parse_tags_value(value: &str) -> Vec<String> {
    if value.starts_with('[') {
        if let Ok(parsed) = serde_json::from_str::<Vec<String>>(value) {
            return parsed;
        }
    }
    value
        .split(',')
        .map(|piece| piece.trim().replace(['"', '\''], ""))
        .collect()
}
