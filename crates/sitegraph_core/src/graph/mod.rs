//! Link graph derivation and serialization.
//!
//! # Responsibility
//! - Convert the parsed note collection into a node/edge graph.
//! - Write the graph artifact consumed by the site's visualization page.
//!
//! # Invariants
//! - One node per note; one edge per unique unordered slug pair.
//! - Edge endpoints are canonically ordered (`source <= target`), so a
//!   pair never appears twice regardless of reference direction.
//! - Edge weight counts every resolved reference occurrence between the
//!   pair, repeats included; unresolved targets contribute nothing.

use crate::model::note::Note;
use log::info;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

/// One graph node, serialized into the site's `graph.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    /// Note slug.
    pub id: String,
    pub title: String,
    /// Serialized as `type` to match the visualization's schema.
    #[serde(rename = "type")]
    pub kind: String,
    pub tags: Vec<String>,
}

/// One weighted undirected edge between two notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphLink {
    /// Lexicographically smaller endpoint of the canonical pair.
    pub source: String,
    /// Lexicographically larger endpoint of the canonical pair.
    pub target: String,
    /// Total resolved reference count between the pair, either direction.
    pub weight: u32,
}

/// Derived, read-only link graph; recomputed wholesale every run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Failure while writing the graph artifact.
#[derive(Debug)]
pub enum GraphError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Serialize(serde_json::Error),
}

impl Display for GraphError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to write graph file `{}`: {source}", path.display())
            }
            Self::Serialize(err) => write!(f, "failed to serialize graph: {err}"),
        }
    }
}

impl Error for GraphError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for GraphError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Builds the link graph from parsed notes and the resolved slug set.
///
/// Weight accumulation intentionally counts repeated references from the
/// same note toward the pair weight while edge existence collapses them;
/// the weight is "strength of relation", the edge is "there is one".
pub fn build_graph(notes: &[Note], slugs: &BTreeSet<String>) -> Graph {
    let nodes = notes
        .iter()
        .map(|note| GraphNode {
            id: note.slug.clone(),
            title: note.title.clone(),
            kind: note.category.as_str().to_string(),
            tags: note.tags.clone(),
        })
        .collect();

    let mut weights: BTreeMap<(String, String), u32> = BTreeMap::new();
    for note in notes {
        for target in &note.wikilinks {
            if slugs.contains(target) {
                *weights
                    .entry(canonical_pair(&note.slug, target))
                    .or_insert(0) += 1;
            }
        }
    }

    let mut links = Vec::new();
    let mut emitted: BTreeSet<(String, String)> = BTreeSet::new();
    for note in notes {
        let mut seen_targets: BTreeSet<&str> = BTreeSet::new();
        for target in &note.wikilinks {
            if !slugs.contains(target) || !seen_targets.insert(target.as_str()) {
                continue;
            }
            let pair = canonical_pair(&note.slug, target);
            if !emitted.insert(pair.clone()) {
                continue;
            }
            let weight = weights.get(&pair).copied().unwrap_or(1);
            links.push(GraphLink {
                source: pair.0,
                target: pair.1,
                weight,
            });
        }
    }

    let graph = Graph { nodes, links };
    info!(
        "event=graph_build module=graph status=ok nodes={} links={}",
        graph.nodes.len(),
        graph.links.len()
    );
    graph
}

/// Normalizes an unordered slug pair into its canonical key.
fn canonical_pair(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// Serializes the graph as pretty JSON, creating parent directories.
pub fn write_graph_file(graph: &Graph, path: &Path) -> GraphResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| GraphError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }

    let payload = serde_json::to_string_pretty(graph)?;
    fs::write(path, payload).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        "event=graph_write module=graph status=ok path={}",
        path.display()
    );
    Ok(())
}
