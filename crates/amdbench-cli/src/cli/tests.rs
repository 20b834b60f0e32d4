#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(clippy::wildcard_enum_match_arm)]

use clap::{CommandFactory, Parser};

use super::*;

/// The root help output must contain all top-level subcommand names.
#[test]
fn test_root_help_lists_all_subcommands() {
    let mut cmd = Cli::command();
    let help = format!("{}", cmd.render_help());

    for name in ["generate", "suite", "bench", "table", "show"] {
        assert!(
            help.contains(name),
            "root help should mention subcommand '{name}'"
        );
    }
}

/// The root help output must describe every global flag.
#[test]
fn test_root_help_lists_global_flags() {
    let mut cmd = Cli::command();
    let help = format!("{}", cmd.render_help());

    for flag in [
        "--config",
        "--test-dir",
        "--results-dir",
        "--quiet",
        "--verbose",
        "--help",
        "--version",
    ] {
        assert!(
            help.contains(flag),
            "root help should mention flag '{flag}'"
        );
    }
}

#[test]
fn test_cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn test_generate_positionals_and_defaults() {
    let cli = Cli::try_parse_from(["amdbench", "generate", "ciclo", "5", "c.txt"])
        .expect("valid args");
    match cli.command {
        Command::Generate {
            topology,
            vertex_count,
            output,
            max_weight,
            density,
            seed,
            show,
        } => {
            assert_eq!(topology, "ciclo");
            assert_eq!(vertex_count, 5);
            assert_eq!(output, PathBuf::from("c.txt"));
            assert_eq!(max_weight, 10);
            assert!((density - 0.2).abs() < f64::EPSILON);
            assert_eq!(seed, None);
            assert!(!show);
        }
        _ => panic!("expected generate"),
    }
}

#[test]
fn test_generate_optional_positionals_and_flags() {
    let cli = Cli::try_parse_from([
        "amdbench", "generate", "dense", "20", "d.txt", "50", "0.5", "--seed", "7", "--show",
    ])
    .expect("valid args");
    match cli.command {
        Command::Generate {
            max_weight,
            density,
            seed,
            show,
            ..
        } => {
            assert_eq!(max_weight, 50);
            assert!((density - 0.5).abs() < f64::EPSILON);
            assert_eq!(seed, Some(7));
            assert!(show);
        }
        _ => panic!("expected generate"),
    }
}

#[test]
fn test_bench_threads_are_comma_separated() {
    let cli = Cli::try_parse_from([
        "amdbench",
        "bench",
        "--threads",
        "1,2,16",
        "--speedup",
        "mean-of-ratios",
    ])
    .expect("valid args");
    match cli.command {
        Command::Bench {
            threads, speedup, ..
        } => {
            assert_eq!(threads, Some(vec![1, 2, 16]));
            assert!(matches!(speedup, Some(SpeedupArg::MeanOfRatios)));
        }
        _ => panic!("expected bench"),
    }
}

#[test]
fn test_quiet_conflicts_with_verbose() {
    assert!(Cli::try_parse_from(["amdbench", "--quiet", "--verbose", "suite"]).is_err());
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["amdbench", "table", "--results-dir", "out"])
        .expect("valid args");
    assert_eq!(cli.results_dir, Some(PathBuf::from("out")));
}

#[test]
fn test_missing_vertex_count_is_usage_error() {
    let err = Cli::try_parse_from(["amdbench", "generate", "ciclo"])
        .err()
        .expect("missing positionals");
    assert_eq!(err.exit_code(), 2);
}
