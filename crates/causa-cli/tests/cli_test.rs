//! End-to-end runs of the `causa` binary against generated CSV files.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use causa_core::Dataset;
use tempfile::TempDir;
use test_fixtures::{collider, fork, mediator};

fn write_csv(dir: &Path, name: &str, data: &Dataset) -> PathBuf {
    let mut text = data.columns().join(",");
    text.push('\n');
    for r in 0..data.n_rows() {
        let row: Vec<String> = (0..data.n_columns())
            .map(|c| data.column_at(c).unwrap()[r].to_string())
            .collect();
        text.push_str(&row.join(","));
        text.push('\n');
    }
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}

/// Run `causa` with an isolated home and config directory.
fn causa(dir: &TempDir, args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_causa"));
    cmd.args(args)
        .arg("--config-dir")
        .arg(dir.path())
        .env("HOME", dir.path())
        .env("CAUSA_LOG", "error");
    for var in [
        "CAUSA_DISCOVERY_ALPHA",
        "CAUSA_DISCOVERY_CI_TEST",
        "CAUSA_DISCOVERY_STRATEGY",
        "CAUSA_DISCOVERY_MAX_CONDITIONING",
        "CAUSA_DISCOVERY_PARALLEL",
        "CAUSA_OUTPUT_FORMAT",
        "CAUSA_CONFIG_DIR",
    ] {
        cmd.env_remove(var);
    }
    cmd.output().unwrap()
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn discover_json_report() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(dir.path(), "collider.csv", &collider().sample(500, 11));

    let out = causa(&dir, &["discover", "--data", csv.to_str().unwrap(), "--format", "json"]);
    assert!(out.status.success(), "{}", stderr(&out));

    let report: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(report["skeleton_edges"], serde_json::json!([["x", "z"], ["y", "z"]]));
    assert_eq!(report["directed_edges"], serde_json::json!([["x", "z"], ["y", "z"]]));
    assert_eq!(report["skeleton_table"].as_array().unwrap().len(), 6);
}

#[test]
fn discover_text_and_dot() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(dir.path(), "collider.csv", &collider().sample(300, 4));

    let out = causa(&dir, &["discover", "--data", csv.to_str().unwrap(), "--strategy", "pc-stable"]);
    assert!(out.status.success(), "{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("Skeleton edges (2):"));
    assert!(text.contains("  x -> z"));

    let out = causa(&dir, &["discover", "--data", csv.to_str().unwrap(), "--dot"]);
    assert!(stdout(&out).starts_with("digraph causal {"));
}

#[test]
fn orient_with_collider_text() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(dir.path(), "fork.csv", &fork().sample(500, 5));

    let out = causa(
        &dir,
        &["orient", "--data", csv.to_str().unwrap(), "--collider", "z", "--pair", "x,y"],
    );
    assert!(out.status.success(), "{}", stderr(&out));
    let text = stdout(&out);
    let causal: Vec<&str> = text.lines().skip_while(|l| !l.starts_with("from")).collect();
    assert_eq!(causal.len(), 3);
    assert!(causal[1].starts_with('z') && causal[1].ends_with('x'));
    assert!(causal[2].starts_with('z') && causal[2].ends_with('y'));
}

#[test]
fn effects_json() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(dir.path(), "mediator.csv", &mediator().sample(500, 42));

    let out = causa(
        &dir,
        &[
            "effects", "--data", csv.to_str().unwrap(),
            "--edge", "x->m", "--edge", "m->y", "--edge", "x->y",
            "--from", "x", "--to", "y", "--format", "json",
        ],
    );
    assert!(out.status.success(), "{}", stderr(&out));
    let report: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    let total = report["effect"]["total"].as_f64().unwrap();
    assert!((total - 0.7).abs() < 1e-6, "total = {total}");
    assert_eq!(report["equations"].as_array().unwrap().len(), 3);
}

#[test]
fn roles_text() {
    let dir = TempDir::new().unwrap();
    let out = causa(
        &dir,
        &["roles", "--edge", "z->x", "--edge", "z->y", "--edge", "x->y", "--from", "x", "--to", "y"],
    );
    assert!(out.status.success(), "{}", stderr(&out));
    assert!(stdout(&out).contains("confounders: z"));
}

#[test]
fn config_reads_project_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("causa.toml"), "[discovery]\nalpha = 0.01\n").unwrap();

    let out = causa(&dir, &["config"]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert!(stdout(&out).contains("alpha = 0.01"));
}

#[test]
fn errors_print_coded_message() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(dir.path(), "fork.csv", &fork().sample(100, 5));

    let out = causa(
        &dir,
        &["orient", "--data", csv.to_str().unwrap(), "--collider", "nope", "--pair", "x,y"],
    );
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("[UNKNOWN_VARIABLE]"), "{}", stderr(&out));

    let out = causa(&dir, &["discover", "--data", "missing.csv"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("[DATA_ERROR]"));

    let out = causa(&dir, &["roles", "--edge", "a->b", "--edge", "b->a", "--from", "a", "--to", "b"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("[CYCLE_DETECTED]"));
}

#[test]
fn invalid_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("causa.toml"), "[discovery]\nalpha = 1.5\n").unwrap();
    let out = causa(&dir, &["config"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("[CONFIG_ERROR]"));
}

#[test]
fn usage_errors_are_coded() {
    let dir = TempDir::new().unwrap();

    let out = causa(&dir, &["discover"]);
    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.starts_with("[USAGE_ERROR]"), "{err}");
    assert!(err.contains("--data"), "{err}");

    let out = causa(&dir, &["effects", "--edge", "x-y"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).starts_with("[USAGE_ERROR]"));

    let out = causa(&dir, &["frobnicate"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).starts_with("[USAGE_ERROR]"));
}

#[test]
fn help_still_succeeds() {
    let dir = TempDir::new().unwrap();
    let out = causa(&dir, &["--help"]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert!(stdout(&out).contains("discover"));
}
