//! Structural and referential corpus validation.
//!
//! # Responsibility
//! - Check per-note frontmatter invariants (required fields, date shape,
//!   tags shape).
//! - Check cross-note referential integrity once the full slug set exists.
//!
//! # Invariants
//! - Validation only reports; it never halts the walk or mutates notes.
//! - The date check is shape-only (`YYYY-MM-DD`); `2024-13-40` passes.
//! - Broken references are reported once per occurrence, not deduplicated.

use crate::model::note::Note;
use crate::model::validation::{ValidationError, ValidationField};
use crate::parse::frontmatter::FieldValue;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date regex"));

const REQUIRED_FIELDS: &[ValidationField] = &[
    ValidationField::Title,
    ValidationField::Date,
    ValidationField::Slug,
    ValidationField::Tags,
];

/// Checks one note's frontmatter fields in isolation.
///
/// Emits one `MissingField` error per absent or empty required field, an
/// `InvalidDate` error for malformed date shapes, and a `TagsNotArray`
/// error when `tags` carries a scalar where a list is required.
pub fn validate_note(
    fields: &BTreeMap<String, FieldValue>,
    path: &Path,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for field in REQUIRED_FIELDS {
        let missing = match fields.get(field.as_str()) {
            None => true,
            Some(FieldValue::Scalar(value)) => value.is_empty(),
            Some(FieldValue::List(_)) => false,
        };
        if missing {
            errors.push(ValidationError::new(
                path,
                *field,
                format!("Missing required field: {field}"),
            ));
        }
    }

    if let Some(FieldValue::Scalar(date)) = fields.get("date") {
        if !date.is_empty() && !DATE_RE.is_match(date) {
            errors.push(ValidationError::new(
                path,
                ValidationField::Date,
                format!("Invalid date format: {date}. Expected YYYY-MM-DD"),
            ));
        }
    }

    if let Some(FieldValue::Scalar(tags)) = fields.get("tags") {
        if !tags.is_empty() {
            errors.push(ValidationError::new(
                path,
                ValidationField::Tags,
                "Tags must be an array",
            ));
        }
    }

    errors
}

/// Checks every wikilink occurrence against the complete slug set.
///
/// Must run as a second pass after the walk finishes, so that forward
/// references within the corpus resolve.
pub fn check_broken_wikilinks(
    notes: &[Note],
    slugs: &BTreeSet<String>,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for note in notes {
        for target in &note.wikilinks {
            if !slugs.contains(target) {
                errors.push(ValidationError::new(
                    note.source_path.as_path(),
                    ValidationField::Wikilink,
                    format!("Broken wikilink: [[{target}]] - target does not exist"),
                ));
            }
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::{check_broken_wikilinks, validate_note};
    use crate::model::note::{Note, NoteCategory};
    use crate::model::validation::ValidationField;
    use crate::parse::frontmatter::FieldValue;
    use std::collections::{BTreeMap, BTreeSet};
    use std::path::Path;

    fn fields(entries: &[(&str, FieldValue)]) -> BTreeMap<String, FieldValue> {
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    fn complete_fields() -> BTreeMap<String, FieldValue> {
        fields(&[
            ("title", FieldValue::Scalar("A note".to_string())),
            ("date", FieldValue::Scalar("2024-03-01".to_string())),
            ("slug", FieldValue::Scalar("a-note".to_string())),
            ("tags", FieldValue::List(vec!["rust".to_string()])),
        ])
    }

    fn note_with_links(slug: &str, path: &str, links: &[&str]) -> Note {
        Note {
            slug: slug.to_string(),
            title: slug.to_string(),
            date: "2024-01-01".to_string(),
            tags: Vec::new(),
            body: String::new(),
            wikilinks: links.iter().map(|l| l.to_string()).collect(),
            word_count: 0,
            source_path: path.into(),
            category: NoteCategory::Note,
        }
    }

    #[test]
    fn complete_frontmatter_has_no_errors() {
        let errors = validate_note(&complete_fields(), Path::new("a.md"));
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn each_absent_required_field_is_reported() {
        let errors = validate_note(&fields(&[]), Path::new("a.md"));
        assert_eq!(errors.len(), 4);
        assert!(errors.iter().all(|e| e.message.starts_with("Missing required field:")));
    }

    #[test]
    fn empty_scalar_counts_as_missing() {
        let mut fm = complete_fields();
        fm.insert("title".to_string(), FieldValue::Scalar(String::new()));
        let errors = validate_note(&fm, Path::new("a.md"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, ValidationField::Title);
    }

    #[test]
    fn date_shape_is_checked_without_calendar_semantics() {
        let mut fm = complete_fields();
        fm.insert(
            "date".to_string(),
            FieldValue::Scalar("2024-13-40".to_string()),
        );
        // Shape-valid, calendar-invalid: passes by documented limitation.
        assert!(validate_note(&fm, Path::new("a.md")).is_empty());

        fm.insert(
            "date".to_string(),
            FieldValue::Scalar("2024/01/01".to_string()),
        );
        let errors = validate_note(&fm, Path::new("a.md"));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("Expected YYYY-MM-DD"));
    }

    #[test]
    fn scalar_tags_value_is_a_shape_error() {
        let mut fm = complete_fields();
        fm.insert(
            "tags".to_string(),
            FieldValue::Scalar("not-a-list".to_string()),
        );
        let errors = validate_note(&fm, Path::new("a.md"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, ValidationField::Tags);
        assert_eq!(errors[0].message, "Tags must be an array");
    }

    #[test]
    fn broken_wikilinks_report_one_error_per_occurrence() {
        let notes = vec![note_with_links(
            "a",
            "content/a.md",
            &["missing", "missing", "missing"],
        )];
        let slugs: BTreeSet<String> = ["a".to_string()].into();
        let errors = check_broken_wikilinks(&notes, &slugs);
        assert_eq!(errors.len(), 3);
        assert!(errors
            .iter()
            .all(|e| e.message.contains("[[missing]]") && e.field == ValidationField::Wikilink));
    }

    #[test]
    fn resolved_wikilinks_are_not_reported() {
        let notes = vec![
            note_with_links("a", "content/a.md", &["b"]),
            note_with_links("b", "content/b.md", &[]),
        ];
        let slugs: BTreeSet<String> = ["a".to_string(), "b".to_string()].into();
        assert!(check_broken_wikilinks(&notes, &slugs).is_empty());
    }
}
