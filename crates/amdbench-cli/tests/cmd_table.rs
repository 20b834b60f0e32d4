//! Integration tests for `amdbench table` and `amdbench show`.
#![allow(clippy::expect_used)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Path to the compiled `amdbench` binary.
fn amdbench_bin() -> PathBuf {
    let mut path = std::env::current_exe().expect("current exe");
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("amdbench");
    path
}

fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(amdbench_bin())
        .current_dir(dir)
        .env_remove("AMDBENCH_CONFIG")
        .env_remove("AMDBENCH_TEST_DIR")
        .env_remove("AMDBENCH_RESULTS_DIR")
        .env_remove("AMDBENCH_LOG_FORMAT")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("run amdbench")
}

const CSV: &str = "file,description,thread_count,repetition,time,speedup,efficiency\n\
ciclo.txt,\"5 vertices, 5 edges\",1,1,0.123400,1.0000,1.0000\n\
ciclo.txt,\"5 vertices, 5 edges\",4,1,0.061700,2.0000,0.5000\n\
ciclo.txt,\"5 vertices, 5 edges\",4,2,,,\n";

#[test]
fn table_missing_csv_exit_2() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = run_in(dir.path(), &["table"]);
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("file not found"), "stderr: {stderr}");
    assert!(stderr.contains("resultados.csv"), "stderr: {stderr}");
}

#[test]
fn table_prints_and_persists_summary() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir(dir.path().join("res")).expect("mkdir");
    std::fs::write(dir.path().join("res/resultados.csv"), CSV).expect("write csv");

    let out = run_in(dir.path(), &["--results-dir", "res", "table"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("PERFORMANCE SUMMARY"), "stdout: {stdout}");
    assert!(stdout.contains("Test: ciclo.txt - 5 vertices, 5 edges"), "stdout: {stdout}");
    assert!(stdout.contains("0.123400"), "stdout: {stdout}");
    assert!(stdout.contains("2.0000"), "stdout: {stdout}");

    let saved = std::fs::read_to_string(dir.path().join("res/tabela_resumo.txt"))
        .expect("table file");
    assert_eq!(saved, stdout);
}

#[test]
fn table_explicit_csv_argument() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("mine.csv"), CSV).expect("write csv");
    let out = run_in(dir.path(), &["-q", "table", "mine.csv", "--speedup", "mean-of-ratios"]);
    assert!(out.status.success());
    assert!(dir.path().join("resultados_desempenho/tabela_resumo.txt").is_file());
}

#[test]
fn table_malformed_csv_exit_2() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("bad.csv"), "a,b\n1,2\n").expect("write csv");
    let out = run_in(dir.path(), &["table", "bad.csv"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn show_prints_dot_and_skips_bad_lines() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("g.txt"), "3 3\n0 1 5\n1 x 2\n1 2 9\n").expect("write");
    let out = run_in(dir.path(), &["show", "g.txt", "--title", "Sample"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("digraph"), "stdout: {stdout}");
    assert!(stdout.contains("Sample"), "stdout: {stdout}");
    assert!(stdout.contains("1 -> 2"), "stdout: {stdout}");

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("WARN"), "stderr: {stderr}");
}

#[test]
fn show_missing_file_exit_2() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = run_in(dir.path(), &["show", "nope.txt"]);
    assert_eq!(out.status.code(), Some(2));
}
