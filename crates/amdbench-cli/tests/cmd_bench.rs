//! Integration tests for `amdbench bench`, using shell scripts in place of
//! the AMD executables.
#![cfg(unix)]
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

/// A workspace with one 5-vertex cycle and two fake executables.
fn workspace(sequential_output: &str, concurrent_output: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir(dir.path().join("Testes")).expect("mkdir");
    std::fs::write(
        dir.path().join("Testes/ciclo.txt"),
        "5 5\n0 1 3\n1 2 3\n2 3 3\n3 4 3\n4 0 3\n",
    )
    .expect("graph");
    std::fs::write(dir.path().join("Testes/notes.md"), "ignored").expect("other file");
    std::fs::write(
        dir.path().join("seq.sh"),
        format!("cat > /dev/null\necho '{sequential_output}'\n"),
    )
    .expect("seq script");
    std::fs::write(
        dir.path().join("conc.sh"),
        format!("cat > /dev/null\necho '{concurrent_output}'\n"),
    )
    .expect("conc script");
    dir
}

#[test]
fn bench_writes_csv_and_table() {
    let dir = workspace("Solucao: 42. Tempo: 0.123400", "Solucao: 42. Tempo: 0.061700");
    let out = run_in(
        dir.path(),
        &[
            "bench",
            "-r",
            "2",
            "-t",
            "1,4",
            "--sequential",
            "sh seq.sh",
            "--concurrent",
            "sh conc.sh",
        ],
    );
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Test: ciclo.txt - 5 vertices, 5 edges"), "stdout: {stdout}");
    assert!(stdout.contains("Sequential: .. Mean: 0.123400s"), "stdout: {stdout}");
    assert!(
        stdout.contains("Concurrent (4 threads): .. Mean: 0.061700s (Speedup: 2.0000x, Efficiency: 0.5000)"),
        "stdout: {stdout}"
    );
    assert!(stdout.contains("PERFORMANCE SUMMARY"), "stdout: {stdout}");
    assert!(!stdout.contains("notes.md"), "stdout: {stdout}");

    let csv = std::fs::read_to_string(dir.path().join("resultados_desempenho/resultados.csv"))
        .expect("csv");
    let rows: Vec<&str> = csv.lines().collect();
    assert_eq!(rows.len(), 5, "csv: {csv}");
    assert!(rows.contains(&"ciclo.txt,\"5 vertices, 5 edges\",1,1,0.123400,1.0000,1.0000"));
    assert!(rows.contains(&"ciclo.txt,\"5 vertices, 5 edges\",4,2,0.061700,2.0000,0.5000"));

    assert!(dir.path().join("resultados_desempenho/tabela_resumo.txt").is_file());
}

#[test]
fn bench_all_missing_still_writes_aggregate() {
    let dir = workspace("no timing here", "crashed");
    let out = run_in(
        dir.path(),
        &[
            "-q",
            "bench",
            "-r",
            "1",
            "-t",
            "2",
            "--sequential",
            "sh seq.sh",
            "--concurrent",
            "sh conc.sh",
        ],
    );
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let csv = std::fs::read_to_string(dir.path().join("resultados_desempenho/resultados.csv"))
        .expect("csv");
    assert!(csv.contains(",1,1,,,"), "csv: {csv}");
    assert!(csv.contains(",2,1,,,"), "csv: {csv}");

    let table = std::fs::read_to_string(dir.path().join("resultados_desempenho/tabela_resumo.txt"))
        .expect("table");
    assert!(table.contains("0.000000"), "table: {table}");
}

#[test]
fn bench_unlaunchable_program_counts_as_missing() {
    let dir = workspace("Tempo: 0.1", "Tempo: 0.1");
    let out = run_in(
        dir.path(),
        &[
            "bench",
            "-r",
            "1",
            "-t",
            "1",
            "--sequential",
            "./does-not-exist",
        ],
    );
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Error!"), "stdout: {stdout}");
}

#[test]
fn bench_without_test_files_exit_1() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir(dir.path().join("Testes")).expect("mkdir");
    let out = run_in(dir.path(), &["bench"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("no test files"), "stderr: {stderr}");
}

#[test]
fn bench_missing_config_file_exit_2() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = run_in(dir.path(), &["--config", "missing.json", "bench"]);
    assert_eq!(out.status.code(), Some(2));
}
