/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

use approx::assert_relative_eq;
use radint_rs::atoms::{BoundStateModel, Element, ElementError};
use radint_rs::utils::PhysicalConstants;
use std::io::Write;
use tempfile::NamedTempFile;

const LITHIUM_JSON: &str = r#"{
    "name": "Li",
    "atomic_number": 3,
    "coefficients": [[[0.95, 0.05]], [[-0.2, 1.0]]],
    "exponents": [[2.7, 0.65]],
    "powers": [[1, 2]],
    "binding_energies": [[64.4], [5.39]]
}"#;

#[test]
fn test_load_element_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(LITHIUM_JSON.as_bytes()).unwrap();

    let lithium = Element::from_json_file(file.path())
        .unwrap()
        .with_constants(PhysicalConstants::atomic());

    assert_eq!(lithium.name, "Li");
    assert_eq!(lithium.n_max(), 2);
    assert_eq!(lithium.shells(), vec![(2, 0), (1, 0)]);
    assert_relative_eq!(lithium.binding_energy(2, 0).unwrap(), 5.39);
    assert_eq!(lithium.bohr_radius(), 1.0);

    let expansion = lithium.expansion(2, 0).unwrap();
    assert_eq!(expansion.len(), 2);
    assert!(lithium.sto_expansion(2, 0).is_some());
    assert!(lithium.radial(2, 0, 1.0).is_finite());
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Element::from_json_file(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, ElementError::FileError(_)));
}

#[test]
fn test_malformed_tables_rejected() {
    let err = Element::from_json_str("{\"name\": \"Li\"}").unwrap_err();
    assert!(matches!(err, ElementError::ParseError(_)));

    // Three coefficients for a two-function basis
    let bad = LITHIUM_JSON.replace("[[-0.2, 1.0]]", "[[-0.2, 1.0, 0.1]]");
    let err = Element::from_json_str(&bad).unwrap_err();
    assert!(matches!(err, ElementError::InvalidTable(_)));
}

#[test]
fn test_invalid_shell_queries() {
    let hydrogen = Element::hydrogen_like(1).unwrap();
    assert!(matches!(
        hydrogen.binding_energy(2, 0),
        Err(ElementError::InvalidShell { n: 2, l: 0, .. })
    ));
    assert!(hydrogen.radial(2, 1, 1.0).is_nan());
    assert!(!hydrogen.contains_shell(0, 0));
}

#[test]
fn test_hydrogen_ground_state_normalisation() {
    let hydrogen = Element::hydrogen_like(1)
        .unwrap()
        .with_constants(PhysicalConstants::atomic());

    // R_10 = 2 e^{-r}
    assert_relative_eq!(hydrogen.radial(1, 0, 0.0), 2.0, max_relative = 1e-12);
    assert_relative_eq!(
        hydrogen.radial(1, 0, 1.5),
        2.0 * (-1.5_f64).exp(),
        max_relative = 1e-12
    );
    assert_relative_eq!(
        hydrogen.radial_derivative(1, 0, 1.5),
        -2.0 * (-1.5_f64).exp(),
        max_relative = 1e-12
    );
    assert_relative_eq!(hydrogen.z_effective(1, 0), 1.0, max_relative = 1e-12);
}
