//! Validation error records.
//!
//! # Responsibility
//! - Define the advisory error shape collected across the whole corpus.
//!
//! # Invariants
//! - Errors never abort a pipeline run; they are aggregated and reported
//!   together after the walk completes (fail-at-end).
//! - `file` always names the offending source file, not the slug.

use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Frontmatter field (or pseudo-field) an error is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationField {
    Title,
    Date,
    Slug,
    Tags,
    /// Cross-note reference errors found in the body, not the frontmatter.
    Wikilink,
}

impl ValidationField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Date => "date",
            Self::Slug => "slug",
            Self::Tags => "tags",
            Self::Wikilink => "wikilink",
        }
    }
}

impl Display for ValidationField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One advisory validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Source file the finding points at.
    pub file: PathBuf,
    /// Field the finding is attached to.
    pub field: ValidationField,
    /// Human-readable explanation.
    pub message: String,
}

impl ValidationError {
    pub fn new(
        file: impl Into<PathBuf>,
        field: ValidationField,
        message: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            field,
            message: message.into(),
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: [{}] {}",
            self.file.display(),
            self.field,
            self.message
        )
    }
}
