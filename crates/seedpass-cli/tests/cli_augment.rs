use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn temp_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("seedpass_cli_{label}_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_seedpass"))
        .current_dir(dir)
        .env("RUST_LOG", "info")
        .args(args)
        .output()
        .expect("run seedpass")
}

fn dump() -> String {
    format!(
        "INSERT INTO users (id, nickname, login_name, pass_hash) VALUES \
         (1, \"Alice\", \"alice\", \"{}\");\n",
        "0".repeat(64)
    )
}

#[test]
fn augment_uses_fixed_file_names_by_default() {
    let dir = temp_dir("defaults");
    fs::write(dir.join("isucon8q-initial-dataset.sql"), dump()).expect("write input");

    let output = run_in(&dir, &["augment"]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let written = fs::read_to_string(dir.join("isucon8q-initial-dataset-password.sql"))
        .expect("read output");
    assert!(written.contains("(id, nickname, login_name, pass_hash, password) VALUES"));
    assert!(written.contains(", \"alicecila\");"));
}

#[test]
fn augment_writes_json_summary() {
    let dir = temp_dir("summary");
    fs::write(dir.join("in.sql"), dump()).expect("write input");
    fs::create_dir_all(dir.join("out")).expect("create output dir");

    let output = run_in(
        &dir,
        &[
            "--log-format",
            "json",
            "augment",
            "--input",
            "in.sql",
            "--output",
            "out/in-password.sql",
            "--verify-hashes",
            "--report",
            "summary.json",
        ],
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(dir.join("out/in-password.sql").exists());

    let summary: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(dir.join("summary.json")).expect("read summary"),
    )
    .expect("parse summary");
    assert_eq!(summary["report"]["headers_rewritten"], 1);
    assert_eq!(summary["report"]["tuples_augmented"], 1);
    assert_eq!(summary["report"]["hash_check"]["mismatched"], 1);
    assert_eq!(summary["report"]["hash_check"]["samples"][0], "alice");
    assert!(summary["started_at"].is_string());
}

#[test]
fn missing_input_exits_with_failure() {
    let dir = temp_dir("missing");

    let output = run_in(&dir, &["augment", "--input", "absent.sql"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot read"), "stderr: {stderr}");
    assert!(!dir.join("isucon8q-initial-dataset-password.sql").exists());
}

#[test]
fn output_in_missing_directory_exits_with_failure() {
    let dir = temp_dir("missing_out_dir");
    fs::write(dir.join("in.sql"), dump()).expect("write input");

    let output = run_in(&dir, &["augment", "--input", "in.sql", "--output", "nope/out.sql"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("cannot write").count(), 1, "stderr: {stderr}");
    assert!(!dir.join("nope").exists());
}
