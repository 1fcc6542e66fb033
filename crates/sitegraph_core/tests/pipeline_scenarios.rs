use sitegraph_core::{run_pipeline, write_graph_file, ValidationField};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn broken_link_scenario_reports_one_error_and_keeps_the_resolved_edge() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "a.md",
        "---\ntitle: A\ndate: 2024-01-01\nslug: a\ntags: x\n---\nsee [[b]]",
    );
    write_file(
        dir.path(),
        "b.md",
        "---\ntitle: B\ndate: 2024-01-02\nslug: b\ntags: x\n---\nno links",
    );
    write_file(
        dir.path(),
        "c.md",
        "---\ntitle: C\ndate: 2024-01-03\nslug: c\ntags: x\n---\nsee [[missing]]",
    );

    let report = run_pipeline(dir.path()).unwrap();

    assert_eq!(report.notes.len(), 3);
    assert_eq!(report.errors.len(), 1);
    let error = &report.errors[0];
    assert_eq!(error.field, ValidationField::Wikilink);
    assert!(error.file.ends_with("c.md"));
    assert!(error.message.contains("[[missing]]"));

    assert_eq!(report.graph.nodes.len(), 3);
    assert_eq!(report.graph.links.len(), 1);
    let link = &report.graph.links[0];
    assert_eq!((link.source.as_str(), link.target.as_str()), ("a", "b"));
    assert_eq!(link.weight, 1);
}

#[test]
fn duplicate_slug_scenario_keeps_both_notes_and_flags_the_second_file() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "first.md",
        "---\ntitle: One\ndate: 2024-01-01\nslug: dup\ntags: x\n---\n",
    );
    write_file(
        dir.path(),
        "second.md",
        "---\ntitle: Two\ndate: 2024-01-02\nslug: dup\ntags: x\n---\n",
    );

    let report = run_pipeline(dir.path()).unwrap();

    assert_eq!(report.notes.len(), 2);
    let dup_errors: Vec<_> = report
        .errors
        .iter()
        .filter(|e| e.message == "Duplicate slug: dup")
        .collect();
    assert_eq!(dup_errors.len(), 1);
    assert!(dup_errors[0].file.ends_with("second.md"));
}

#[test]
fn empty_corpus_produces_empty_graph_and_not_applicable_dates() {
    let dir = TempDir::new().unwrap();

    let report = run_pipeline(dir.path()).unwrap();
    assert!(report.notes.is_empty());
    assert!(report.errors.is_empty());
    assert!(report.graph.nodes.is_empty());
    assert!(report.graph.links.is_empty());
    assert_eq!(report.stats.first_post_date, "N/A");
    assert_eq!(report.stats.latest_post_date, "N/A");
}

#[test]
fn mutual_references_produce_one_edge_with_summed_weight() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "x.md",
        "---\ntitle: X\ndate: 2024-01-01\nslug: x\ntags: t\n---\n[[y]]",
    );
    write_file(
        dir.path(),
        "y.md",
        "---\ntitle: Y\ndate: 2024-01-02\nslug: y\ntags: t\n---\n[[x]] and again [[x]]",
    );

    let report = run_pipeline(dir.path()).unwrap();
    assert!(report.errors.is_empty());
    assert_eq!(report.graph.links.len(), 1);
    assert_eq!(report.graph.links[0].weight, 3);
}

#[test]
fn graph_file_round_trips_through_json() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "content/a.md",
        "---\ntitle: A\ndate: 2024-01-01\nslug: a\ntags: rust, graphs\n---\n[[b]]",
    );
    write_file(
        dir.path(),
        "content/builds/b.md",
        "---\ntitle: B\ndate: 2024-01-02\nslug: b\ntags: rust\n---\n",
    );

    let report = run_pipeline(&dir.path().join("content")).unwrap();
    let out_path = dir.path().join("public/graph.json");
    write_graph_file(&report.graph, &out_path).unwrap();

    let payload = fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&payload).unwrap();

    let nodes = parsed["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 2);
    let b_node = nodes.iter().find(|n| n["id"] == "b").unwrap();
    assert_eq!(b_node["type"], "build");
    assert_eq!(b_node["title"], "B");

    let links = parsed["links"].as_array().unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0]["source"], "a");
    assert_eq!(links[0]["target"], "b");
    assert_eq!(links[0]["weight"], 1);
}

#[test]
fn malformed_metadata_degrades_to_advisory_errors_not_failures() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "bad-date.md",
        "---\ntitle: Bad\ndate: 03/01/2024\nslug: bad-date\ntags: x\n---\n",
    );
    write_file(
        dir.path(),
        "unclosed.md",
        "---\ntitle: never closed\nbody keeps everything",
    );

    let report = run_pipeline(dir.path()).unwrap();
    assert_eq!(report.notes.len(), 2);

    let date_errors: Vec<_> = report
        .errors
        .iter()
        .filter(|e| e.field == ValidationField::Date && e.message.contains("Invalid date format"))
        .collect();
    assert_eq!(date_errors.len(), 1);

    // The unclosed block parses as zero fields, so its body survives intact
    // and every required field is reported missing.
    let unclosed = report
        .notes
        .iter()
        .find(|n| n.slug == "unclosed")
        .unwrap();
    assert!(unclosed.body.contains("never closed"));
    let unclosed_missing = report
        .errors
        .iter()
        .filter(|e| e.file.ends_with("unclosed.md"))
        .count();
    assert_eq!(unclosed_missing, 4);
}
