//! Core content-graph pipeline for the sitegraph static site generator.
//! This crate is the single source of truth for corpus invariants.

pub mod corpus;
pub mod graph;
pub mod logging;
pub mod model;
pub mod parse;
pub mod pipeline;
pub mod stats;
pub mod validate;

pub use corpus::{scan_corpus, Corpus, CorpusError, CorpusResult};
pub use graph::{
    build_graph, write_graph_file, Graph, GraphError, GraphLink, GraphNode, GraphResult,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteCategory};
pub use model::validation::{ValidationError, ValidationField};
pub use parse::frontmatter::{parse_frontmatter, FieldValue, Frontmatter};
pub use parse::wikilink::extract_wikilinks;
pub use pipeline::{run_pipeline, PipelineReport};
pub use stats::{compute_stats, generate_stats, SiteStats, TagCount};
pub use validate::{check_broken_wikilinks, validate_note};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
