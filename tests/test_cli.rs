//! Tests for CLI argument parsing

use clap::Parser;
use gradelens::cli::Cli;
use gradelens::pipeline::{Predicate, PrepareOptions};
use std::path::PathBuf;

#[test]
fn test_cli_default_values() {
    let cli = Cli::parse_from(["gradelens", "-i", "students.csv"]);

    assert_eq!(cli.target, "Grade", "Default target should be Grade");
    assert_eq!(cli.trees, 100);
    assert_eq!(cli.max_depth, 10);
    assert_eq!(cli.seed, 42);
    assert_eq!(cli.correlation_threshold, 0.30);
    assert_eq!(cli.top_pairs, 10);
    assert!(!cli.scale);
    assert!(!cli.encoded_export);
    assert!(cli.export.is_none());
    assert!(cli.predicates().is_empty());
    assert_eq!(cli.infer_schema_length, 10000);
}

#[test]
fn test_cli_requires_input() {
    assert!(Cli::try_parse_from(["gradelens"]).is_err());
}

#[test]
fn test_preset_used_without_column_lists() {
    let cli = Cli::parse_from(["gradelens", "-i", "students.csv", "--scale"]);

    assert_eq!(
        cli.prepare_options(),
        PrepareOptions::students_grading().with_scale(true)
    );
}

#[test]
fn test_custom_column_lists() {
    let cli = Cli::parse_from([
        "gradelens",
        "-i",
        "data.csv",
        "-t",
        "Outcome",
        "--drop-columns",
        "id,name",
        "--categorical",
        "Outcome,Region",
    ]);

    let options = cli.prepare_options();
    assert_eq!(options.drop_fields, vec!["id", "name"]);
    assert_eq!(options.categorical_fields, vec!["Outcome", "Region"]);
    assert!(!options.scale);
    assert_eq!(cli.target, "Outcome");
}

#[test]
fn test_repeated_filters() {
    let cli = Cli::parse_from([
        "gradelens",
        "-i",
        "students.csv",
        "--filter",
        "Department=CS,Math",
        "--range",
        "Age=18:21",
        "--filter",
        "Gender=Female",
    ]);

    assert_eq!(
        cli.predicates(),
        vec![
            Predicate::membership("Department", ["CS", "Math"]),
            Predicate::membership("Gender", ["Female"]),
            Predicate::range("Age", 18.0, 21.0),
        ]
    );
}

#[test]
fn test_malformed_filters_are_rejected() {
    assert!(Cli::try_parse_from(["gradelens", "-i", "s.csv", "--filter", "Department"]).is_err());
    assert!(Cli::try_parse_from(["gradelens", "-i", "s.csv", "--range", "Age=18"]).is_err());
    assert!(Cli::try_parse_from(["gradelens", "-i", "s.csv", "--range", "Age=a:b"]).is_err());
}

#[test]
fn test_invalid_numbers_are_rejected() {
    assert!(Cli::try_parse_from([
        "gradelens",
        "-i",
        "s.csv",
        "--correlation-threshold",
        "1.5"
    ])
    .is_err());
    assert!(Cli::try_parse_from(["gradelens", "-i", "s.csv", "--trees", "0"]).is_err());
}

#[test]
fn test_forest_config_from_flags() {
    let cli = Cli::parse_from([
        "gradelens",
        "-i",
        "students.csv",
        "--trees",
        "25",
        "--max-depth",
        "0",
        "--seed",
        "7",
    ]);

    let config = cli.forest_config();
    assert_eq!(config.n_trees, 25);
    assert_eq!(config.max_depth, None);
    assert_eq!(config.seed, 7);
    assert!(config.bootstrap);
}

#[test]
fn test_report_path_derivation() {
    let cli = Cli::parse_from(["gradelens", "-i", "/path/to/students.csv"]);
    assert_eq!(
        cli.report_path(),
        PathBuf::from("/path/to/students_analysis.json")
    );

    let cli = Cli::parse_from([
        "gradelens",
        "-i",
        "/path/to/students.csv",
        "--report",
        "out.json",
    ]);
    assert_eq!(cli.report_path(), PathBuf::from("out.json"));
}
