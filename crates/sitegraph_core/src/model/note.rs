//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical parsed-note record produced by the corpus walker.
//! - Derive the presentational category from the note's storage location.
//!
//! # Invariants
//! - `slug` is the note's identity; `source_path` is diagnostics only.
//! - `date` holds the `1970-01-01` sentinel when frontmatter omits it; the
//!   missing date is reported by validation, never silently accepted.
//! - `wikilinks` preserves appearance order and duplicates.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Presentational classification derived from the note's subtree.
///
/// Never authored in frontmatter; recomputed from `source_path` each run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteCategory {
    Note,
    Build,
    Project,
    Reading,
    Daily,
    Book,
}

/// Subtree names checked in precedence order; the first category whose
/// directory name appears anywhere in the path wins.
const CATEGORY_SUBTREES: &[(&str, NoteCategory)] = &[
    ("builds", NoteCategory::Build),
    ("projects", NoteCategory::Project),
    ("reading", NoteCategory::Reading),
    ("daily", NoteCategory::Daily),
    ("books", NoteCategory::Book),
];

impl NoteCategory {
    /// Classifies a source path by its first-matching subtree name.
    pub fn from_path(path: &Path) -> Self {
        for (subtree, category) in CATEGORY_SUBTREES {
            let matched = path
                .components()
                .filter_map(|c| c.as_os_str().to_str())
                .any(|segment| segment.eq_ignore_ascii_case(subtree));
            if matched {
                return *category;
            }
        }
        Self::Note
    }

    /// Stable lowercase name used in graph output and stats partitions.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Build => "build",
            Self::Project => "project",
            Self::Reading => "reading",
            Self::Daily => "daily",
            Self::Book => "book",
        }
    }
}

/// One parsed content file.
///
/// Built once per pipeline run by the corpus walker; downstream components
/// only read it. Field fallbacks (slug from filename, title from slug,
/// sentinel date) are applied at construction time so every consumer sees
/// a total record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    /// Unique key across the corpus; author-supplied or filename-derived.
    pub slug: String,
    /// Display title; falls back to `slug`.
    pub title: String,
    /// `YYYY-MM-DD` date string; `1970-01-01` sentinel when missing.
    pub date: String,
    /// Ordered tags, possibly empty.
    pub tags: Vec<String>,
    /// Document content after the frontmatter block.
    pub body: String,
    /// Raw wikilink targets in order of appearance, duplicates kept.
    pub wikilinks: Vec<String>,
    /// Whitespace-delimited token count of `body`.
    pub word_count: usize,
    /// Origin file, for diagnostics and category classification only.
    pub source_path: PathBuf,
    /// Subtree-derived presentational category.
    pub category: NoteCategory,
}
