/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

use clap::Parser;
use radint_rs::cli::{execute, load_config, Cli};
use radint_rs::integrals::IntegrationMethod;
use std::io::Write;
use tempfile::NamedTempFile;

fn json_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_compare_with_element_file() {
    let element = json_file(
        r#"{
            "name": "He+",
            "atomic_number": 2,
            "coefficients": [[[1.0]]],
            "exponents": [[2.0]],
            "powers": [[1]],
            "binding_energies": [[54.42277]]
        }"#,
    );
    let path = element.path().to_str().unwrap();

    let cli = Cli::try_parse_from([
        "radint", "--units", "atomic", "compare", "--element", path, "--kind", "1", "-n", "1",
        "-l", "0", "-k", "1.8", "--l-prime", "0", "-L", "0", "-q", "15", "--methods",
        "quadosc,numpy-stepwise",
    ])
    .unwrap();
    let output = execute(&cli).unwrap();

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("He+ 1s"));
    assert!(lines[1].starts_with("quadosc\t"));
    assert!(lines[2].starts_with("numpy-stepwise\t"));
    assert!(!output.contains("no result"));
}

#[test]
fn test_select_prints_best_method() {
    let cli = Cli::try_parse_from([
        "radint", "--units", "atomic", "select", "--hydrogen-like", "2", "--kind", "1", "-n",
        "1", "-l", "0", "-k", "1.8", "--l-prime", "1", "-L", "1", "-q", "15", "--verbose",
    ])
    .unwrap();
    let output = execute(&cli).unwrap();

    assert!(output.starts_with("Results:"));
    assert!(output.contains("Working methods:"));
    let best = output
        .lines()
        .find_map(|line| line.strip_prefix("Best method:\t"))
        .unwrap();
    assert!(best.parse::<IntegrationMethod>().is_ok());
}

#[test]
fn test_config_file_overrides_defaults() {
    let config = json_file(r#"{ "agreement_tolerance": 0.05, "window_bohr": 2.0 }"#);
    let path = config.path().to_str().unwrap();

    let cli = Cli::try_parse_from([
        "radint", "--config", path, "--units", "atomic", "multipoles", "--l", "0", "--l-prime",
        "1",
    ])
    .unwrap();
    let config = load_config(&cli).unwrap();

    assert_eq!(config.agreement_tolerance, 0.05);
    assert_eq!(config.window_bohr, 2.0);
    assert_eq!(config.analytic_max_terms, 200);
    assert_eq!(config.constants.bohr_radius, 1.0);
}

#[test]
fn test_missing_element_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("none.json");

    let cli = Cli::try_parse_from([
        "radint", "select", "--element", missing.to_str().unwrap(), "-n", "1", "-l", "0", "-k",
        "1", "--l-prime", "0", "-L", "0", "-q", "1",
    ])
    .unwrap();
    let err = execute(&cli).unwrap_err();
    assert!(err.to_string().contains("Failed to load element"));
}
