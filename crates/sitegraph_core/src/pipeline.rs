//! Full pipeline orchestration.
//!
//! # Responsibility
//! - Run walk → validate → graph → stats as one batch computation.
//! - Return a single report value; fatality decisions belong to callers.
//!
//! # Invariants
//! - Data flows one way: raw files → notes → {errors, graph, stats}.
//! - The broken-link pass runs only after the slug set is complete.
//! - Advisory errors never short-circuit graph or stats computation.

use crate::corpus::{scan_corpus, CorpusResult};
use crate::graph::{build_graph, Graph};
use crate::model::note::Note;
use crate::model::validation::ValidationError;
use crate::stats::{generate_stats, SiteStats};
use crate::validate::check_broken_wikilinks;
use log::info;
use std::path::Path;

/// Result of one complete pipeline run over a content root.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Parsed notes in traversal order.
    pub notes: Vec<Note>,
    /// All advisory findings: per-note, duplicate-slug and broken-link.
    pub errors: Vec<ValidationError>,
    pub graph: Graph,
    pub stats: SiteStats,
}

/// Runs the whole pipeline once against `root`.
///
/// Hard failure only on catastrophic I/O; every structural problem is an
/// advisory entry in `errors`.
pub fn run_pipeline(root: &Path) -> CorpusResult<PipelineReport> {
    let corpus = scan_corpus(root)?;

    let mut errors = corpus.errors;
    errors.extend(check_broken_wikilinks(&corpus.notes, &corpus.slugs));

    let graph = build_graph(&corpus.notes, &corpus.slugs);
    let stats = generate_stats(&corpus.notes);

    info!(
        "event=pipeline_run module=pipeline status=ok root={} notes={} errors={} nodes={} links={}",
        root.display(),
        corpus.notes.len(),
        errors.len(),
        graph.nodes.len(),
        graph.links.len()
    );

    Ok(PipelineReport {
        notes: corpus.notes,
        errors,
        graph,
        stats,
    })
}
