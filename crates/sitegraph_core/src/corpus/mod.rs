//! Corpus discovery and per-file parsing.
//!
//! # Responsibility
//! - Walk the content root and parse every markdown file into a `Note`.
//! - Run per-note validation and duplicate-slug detection inline.
//!
//! # Invariants
//! - Traversal order is deterministic (name-sorted, depth-first).
//! - A missing or unreadable root yields an empty corpus, not an error;
//!   only per-file I/O failures abort the run.
//! - The slug set is populated incrementally: the first occurrence wins,
//!   later duplicates are flagged but still enumerated in `notes`.

use crate::model::note::{Note, NoteCategory};
use crate::model::validation::{ValidationError, ValidationField};
use crate::parse::count_words;
use crate::parse::frontmatter::{parse_frontmatter, FieldValue};
use crate::parse::wikilink::extract_wikilinks;
use crate::validate::validate_note;
use log::{debug, info};
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Markdown extensions recognized by the walker, longest first so the
/// filename-derived slug strips `.mdx` before `.md`.
const MARKDOWN_EXTENSIONS: &[&str] = &[".mdx", ".md"];

pub type CorpusResult<T> = Result<T, CorpusError>;

/// Hard failure while reading the content tree.
///
/// Advisory findings never take this path; they are collected as
/// `ValidationError` records inside the corpus instead.
#[derive(Debug)]
pub enum CorpusError {
    /// A discovered content file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Directory traversal failed below the root.
    Traversal(walkdir::Error),
}

impl Display for CorpusError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read `{}`: {source}", path.display())
            }
            Self::Traversal(err) => write!(f, "content tree traversal failed: {err}"),
        }
    }
}

impl Error for CorpusError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Traversal(err) => Some(err),
        }
    }
}

impl From<walkdir::Error> for CorpusError {
    fn from(value: walkdir::Error) -> Self {
        Self::Traversal(value)
    }
}

/// Everything one scan produces: parsed notes, advisory errors collected
/// so far, and the deduplicated slug set.
///
/// A pure result value; the walker owns no state across runs.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    /// Notes in traversal order, duplicates included.
    pub notes: Vec<Note>,
    /// Per-note and duplicate-slug findings from the walk. Broken-link
    /// findings require the full slug set and are appended by the caller.
    pub errors: Vec<ValidationError>,
    /// First-occurrence slug set used for reference resolution.
    pub slugs: BTreeSet<String>,
}

/// Recursively scans `root` and parses every `.md`/`.mdx` file.
pub fn scan_corpus(root: &Path) -> CorpusResult<Corpus> {
    let mut corpus = Corpus::default();

    if !root.is_dir() {
        info!(
            "event=corpus_scan module=corpus status=ok root={} notes=0 detail=missing_root",
            root.display()
        );
        return Ok(corpus);
    }

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            // An unreadable root is "no content", same as a missing one.
            Err(err) if err.depth() == 0 => {
                debug!(
                    "event=corpus_scan module=corpus status=skip root={} reason={err}",
                    root.display()
                );
                return Ok(corpus);
            }
            Err(err) => return Err(err.into()),
        };

        if !entry.file_type().is_file() {
            continue;
        }
        let Some(file_name) = entry.file_name().to_str() else {
            continue;
        };
        if !MARKDOWN_EXTENSIONS
            .iter()
            .any(|ext| file_name.ends_with(ext))
        {
            continue;
        }

        let raw = fs::read_to_string(entry.path()).map_err(|source| CorpusError::Io {
            path: entry.path().to_path_buf(),
            source,
        })?;
        ingest_file(&mut corpus, entry.path(), file_name, &raw);
    }

    info!(
        "event=corpus_scan module=corpus status=ok root={} notes={} errors={}",
        root.display(),
        corpus.notes.len(),
        corpus.errors.len()
    );
    Ok(corpus)
}

/// Parses one file's raw text into a `Note` and records its findings.
fn ingest_file(corpus: &mut Corpus, path: &Path, file_name: &str, raw: &str) {
    let fm = parse_frontmatter(raw);

    let slug = scalar_field(&fm.fields, "slug")
        .map(str::to_string)
        .unwrap_or_else(|| slug_from_filename(file_name));
    let title = scalar_field(&fm.fields, "title")
        .map(str::to_string)
        .unwrap_or_else(|| slug.clone());
    let date = scalar_field(&fm.fields, "date")
        .map(str::to_string)
        .unwrap_or_else(|| "1970-01-01".to_string());
    let tags = fm
        .fields
        .get("tags")
        .and_then(FieldValue::as_list)
        .map(<[String]>::to_vec)
        .unwrap_or_default();

    corpus.errors.extend(validate_note(&fm.fields, path));

    if !corpus.slugs.insert(slug.clone()) {
        corpus.errors.push(ValidationError::new(
            path,
            ValidationField::Slug,
            format!("Duplicate slug: {slug}"),
        ));
    }

    let wikilinks = extract_wikilinks(&fm.body);
    let word_count = count_words(&fm.body);

    corpus.notes.push(Note {
        slug,
        title,
        date,
        tags,
        wikilinks,
        word_count,
        source_path: path.to_path_buf(),
        category: NoteCategory::from_path(path),
        body: fm.body,
    });
}

/// Returns a non-empty scalar field value, treating empty as absent so
/// fallbacks apply.
fn scalar_field<'a>(fields: &'a BTreeMap<String, FieldValue>, name: &str) -> Option<&'a str> {
    fields
        .get(name)
        .and_then(FieldValue::as_scalar)
        .filter(|value| !value.is_empty())
}

/// Derives an identifier from a markdown filename by stripping the
/// extension.
fn slug_from_filename(file_name: &str) -> String {
    for ext in MARKDOWN_EXTENSIONS {
        if let Some(stem) = file_name.strip_suffix(ext) {
            return stem.to_string();
        }
    }
    file_name.to_string()
}

#[cfg(test)]
mod tests {
    use super::{ingest_file, slug_from_filename, Corpus};
    use std::path::Path;

    #[test]
    fn slug_strips_markdown_extensions() {
        assert_eq!(slug_from_filename("hello.md"), "hello");
        assert_eq!(slug_from_filename("hello.mdx"), "hello");
        assert_eq!(slug_from_filename("archive.md.md"), "archive.md");
    }

    #[test]
    fn explicit_slug_wins_over_filename() {
        let mut corpus = Corpus::default();
        ingest_file(
            &mut corpus,
            Path::new("content/file-name.md"),
            "file-name.md",
            "---\ntitle: T\ndate: 2024-01-01\nslug: explicit\ntags: a\n---\nbody",
        );
        assert_eq!(corpus.notes[0].slug, "explicit");
        assert!(corpus.slugs.contains("explicit"));
    }

    #[test]
    fn missing_metadata_falls_back_and_flags_errors() {
        let mut corpus = Corpus::default();
        ingest_file(
            &mut corpus,
            Path::new("content/bare.md"),
            "bare.md",
            "just a body with [[link]]",
        );
        let note = &corpus.notes[0];
        assert_eq!(note.slug, "bare");
        assert_eq!(note.title, "bare");
        assert_eq!(note.date, "1970-01-01");
        assert!(note.tags.is_empty());
        assert_eq!(note.wikilinks, vec!["link"]);
        // title, date, slug, tags all missing from frontmatter.
        assert_eq!(corpus.errors.len(), 4);
    }

    #[test]
    fn duplicate_slug_is_flagged_on_second_occurrence_only() {
        let mut corpus = Corpus::default();
        let raw = "---\ntitle: T\ndate: 2024-01-01\nslug: dup\ntags: a\n---\n";
        ingest_file(&mut corpus, Path::new("content/one.md"), "one.md", raw);
        ingest_file(&mut corpus, Path::new("content/two.md"), "two.md", raw);

        assert_eq!(corpus.notes.len(), 2);
        let dup_errors: Vec<_> = corpus
            .errors
            .iter()
            .filter(|e| e.message.contains("Duplicate slug"))
            .collect();
        assert_eq!(dup_errors.len(), 1);
        assert_eq!(dup_errors[0].file, Path::new("content/two.md"));
    }
}
