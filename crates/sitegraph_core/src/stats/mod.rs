//! Corpus-wide statistics.
//!
//! # Responsibility
//! - Compute counts, tag frequencies, word totals and the date range in a
//!   single pass over the parsed note collection.
//!
//! # Invariants
//! - Date min/max compare `YYYY-MM-DD` strings lexicographically, which is
//!   date-correct for that shape.
//! - An empty corpus reports `N/A` for both ends of the date range; the
//!   internal comparison sentinels never leak into output.
//! - Top-tag ties break by first-seen order in the corpus.

use crate::model::note::{Note, NoteCategory};
use chrono::Datelike;
use log::info;
use serde::Serialize;

const TOP_TAGS_LIMIT: usize = 5;
const MIN_DATE_SENTINEL: &str = "9999-99-99";
const MAX_DATE_SENTINEL: &str = "0000-00-00";
const DATE_NOT_APPLICABLE: &str = "N/A";

/// One tag with its corpus-wide usage count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Aggregated corpus metrics; field names match the site's stats schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteStats {
    pub total_notes: usize,
    pub total_builds: usize,
    pub total_projects: usize,
    /// Everything that is neither a build nor a project.
    pub total_notes_count: usize,
    /// Best-effort heuristic over book notes, see `compute_stats`.
    pub books_read_this_year: usize,
    pub total_tags: usize,
    pub top_tags: Vec<TagCount>,
    pub total_word_count: usize,
    pub first_post_date: String,
    pub latest_post_date: String,
    /// Total wikilink occurrences, resolved or not.
    pub link_count: usize,
}

/// Computes corpus statistics for a fixed calendar year.
///
/// The `books_read_this_year` figure is a text heuristic, not structured
/// data: a book-category note counts when its body mentions `status`
/// together with `read` or `finished` and its date falls in
/// `current_year`.
pub fn compute_stats(notes: &[Note], current_year: i32) -> SiteStats {
    let year_prefix = current_year.to_string();

    let mut total_builds = 0;
    let mut total_projects = 0;
    let mut total_notes_count = 0;
    let mut books_read_this_year = 0;
    let mut total_word_count = 0;
    let mut link_count = 0;
    let mut tag_counts: Vec<TagCount> = Vec::new();

    let mut first_post_date = MIN_DATE_SENTINEL.to_string();
    let mut latest_post_date = MAX_DATE_SENTINEL.to_string();

    for note in notes {
        if note.date < first_post_date {
            first_post_date = note.date.clone();
        }
        if note.date > latest_post_date {
            latest_post_date = note.date.clone();
        }

        total_word_count += note.word_count;
        link_count += note.wikilinks.len();

        match note.category {
            NoteCategory::Build => total_builds += 1,
            NoteCategory::Project => total_projects += 1,
            _ => total_notes_count += 1,
        }

        if note.category == NoteCategory::Book && note.date.starts_with(&year_prefix) {
            let body = note.body.to_lowercase();
            if body.contains("status") && (body.contains("read") || body.contains("finished")) {
                books_read_this_year += 1;
            }
        }

        for tag in &note.tags {
            match tag_counts.iter_mut().find(|entry| entry.tag == *tag) {
                Some(entry) => entry.count += 1,
                None => tag_counts.push(TagCount {
                    tag: tag.clone(),
                    count: 1,
                }),
            }
        }
    }

    let total_tags = tag_counts.len();
    // Stable sort keeps first-seen order among equal counts.
    tag_counts.sort_by(|a, b| b.count.cmp(&a.count));
    tag_counts.truncate(TOP_TAGS_LIMIT);

    let stats = SiteStats {
        total_notes: notes.len(),
        total_builds,
        total_projects,
        total_notes_count,
        books_read_this_year,
        total_tags,
        top_tags: tag_counts,
        total_word_count,
        first_post_date: replace_sentinel(first_post_date, MIN_DATE_SENTINEL),
        latest_post_date: replace_sentinel(latest_post_date, MAX_DATE_SENTINEL),
        link_count,
    };

    info!(
        "event=stats_compute module=stats status=ok notes={} words={} links={}",
        stats.total_notes, stats.total_word_count, stats.link_count
    );
    stats
}

/// Computes statistics against the current local calendar year.
pub fn generate_stats(notes: &[Note]) -> SiteStats {
    compute_stats(notes, chrono::Local::now().year())
}

fn replace_sentinel(date: String, sentinel: &str) -> String {
    if date == sentinel {
        DATE_NOT_APPLICABLE.to_string()
    } else {
        date
    }
}
