//! Build-verification and artifact-generation entry point.
//!
//! # Responsibility
//! - `check`: run the full pipeline, print every finding grouped by file,
//!   and fail the build (non-zero exit) when any error exists.
//! - `graph` / `stats`: emit the derived artifacts without failing on
//!   advisory errors.
//!
//! # Invariants
//! - A run never stops at the first bad file; all findings print together.
//! - Zero discovered notes is fatal for `check` (empty corpus means the
//!   content root is wrong, not that the site is clean).

use clap::{Parser, Subcommand};
use sitegraph_core::{
    default_log_level, init_logging, run_pipeline, write_graph_file, PipelineReport,
    ValidationError,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "sitegraph", version, about = "Content-graph pipeline for the site")]
struct Cli {
    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long, global = true)]
    log_dir: Option<String>,

    /// Log level used when --log-dir is set.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate the corpus and write the graph artifact; non-zero exit on
    /// any finding.
    Check {
        /// Content root to scan.
        content_dir: PathBuf,
        /// Graph artifact output path.
        #[arg(long, default_value = "public/graph.json")]
        graph_out: PathBuf,
    },
    /// Generate the graph artifact even when validation findings exist.
    Graph {
        content_dir: PathBuf,
        #[arg(long, default_value = "public/graph.json")]
        out: PathBuf,
    },
    /// Print the corpus statistics report as JSON.
    Stats { content_dir: PathBuf },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("logging setup failed: {err}");
            return ExitCode::FAILURE;
        }
    }

    match cli.command {
        Command::Check {
            content_dir,
            graph_out,
        } => run_check(&content_dir, &graph_out),
        Command::Graph { content_dir, out } => run_graph(&content_dir, &out),
        Command::Stats { content_dir } => run_stats(&content_dir),
    }
}

fn run_check(content_dir: &std::path::Path, graph_out: &std::path::Path) -> ExitCode {
    let report = match run_pipeline(content_dir) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("content scan failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    if report.notes.is_empty() {
        eprintln!(
            "content validation FAILED: no notes found under `{}`",
            content_dir.display()
        );
        return ExitCode::FAILURE;
    }

    if !report.errors.is_empty() {
        eprintln!("content validation FAILED\n");
        print_errors(&report.errors);
        log::info!(
            "event=check module=cli status=failed notes={} errors={}",
            report.notes.len(),
            report.errors.len()
        );
        return ExitCode::FAILURE;
    }

    println!("validation passed: {} notes", report.notes.len());
    write_graph_and_report(&report, graph_out)
}

fn run_graph(content_dir: &std::path::Path, out: &std::path::Path) -> ExitCode {
    let report = match run_pipeline(content_dir) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("content scan failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    // Advisory findings are printed but never block graph generation.
    if !report.errors.is_empty() {
        eprintln!("graph generation found {} errors:", report.errors.len());
        print_errors(&report.errors);
    }

    write_graph_and_report(&report, out)
}

fn run_stats(content_dir: &std::path::Path) -> ExitCode {
    let report = match run_pipeline(content_dir) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("content scan failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&report.stats) {
        Ok(payload) => {
            println!("{payload}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("failed to serialize stats: {err}");
            ExitCode::FAILURE
        }
    }
}

fn write_graph_and_report(report: &PipelineReport, out: &std::path::Path) -> ExitCode {
    if let Err(err) = write_graph_file(&report.graph, out) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }
    println!(
        "graph generated: {} nodes, {} links",
        report.graph.nodes.len(),
        report.graph.links.len()
    );
    ExitCode::SUCCESS
}

/// Prints findings grouped by file, one header line per file.
fn print_errors(errors: &[ValidationError]) {
    let mut sorted: Vec<&ValidationError> = errors.iter().collect();
    // Stable sort: findings keep their discovery order within each file.
    sorted.sort_by(|a, b| a.file.cmp(&b.file));

    let mut last_file: Option<&std::path::Path> = None;
    for error in sorted {
        if last_file != Some(error.file.as_path()) {
            eprintln!("  {}", error.file.display());
            last_file = Some(error.file.as_path());
        }
        eprintln!("    [{}] {}", error.field, error.message);
    }
}
