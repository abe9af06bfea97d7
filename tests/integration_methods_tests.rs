/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

use approx::assert_relative_eq;
use radint_rs::atoms::Element;
use radint_rs::continuum::ContinuumModel;
use radint_rs::integrals::analytic::analytic_series;
use radint_rs::integrals::{
    radial_integral_by_name, radial_integral_with_config, IntegralError, IntegralKind,
    IntegralRequest, IntegrationConfig, IntegrationMethod, SeriesOutcome,
};
use radint_rs::utils::math::spherical_bessel_j;
use radint_rs::utils::PhysicalConstants;
use rstest::rstest;
use std::f64::consts::PI;

fn helium_ion() -> Element {
    Element::hydrogen_like(2)
        .unwrap()
        .with_constants(PhysicalConstants::atomic())
}

/// Free spherical waves 4π j_l'(kr), i.e. a continuum with the charge switched off
struct PlaneWave;

impl ContinuumModel for PlaneWave {
    fn radial(&self, r: f64, k: f64, l_prime: u32, _z_eff: f64) -> f64 {
        4.0 * PI * spherical_bessel_j(l_prime as i32, k * r).unwrap_or(f64::NAN)
    }
}

#[rstest]
#[case(IntegralKind::Radial, 0, 0, 4.0)]
#[case(IntegralKind::Radial, 1, 1, 4.0)]
#[case(IntegralKind::Reduced, 0, 1, 4.0)]
#[case(IntegralKind::Reduced, 2, 2, 3.0)]
fn test_methods_agree_with_quadosc(
    #[case] kind: IntegralKind,
    #[case] l_prime: u32,
    #[case] multipole: u32,
    #[case] q: f64,
    #[values(
        IntegrationMethod::Hankel,
        IntegrationMethod::Analytic,
        IntegrationMethod::TanhSinh,
        IntegrationMethod::TanhSinhStepwise,
        IntegrationMethod::Numpy,
        IntegrationMethod::NumpyStepwise
    )]
    method: IntegrationMethod,
) {
    let element = helium_ion();
    let config = IntegrationConfig::atomic_units();
    let request = IntegralRequest::new(kind, &element, 1, 0, 0.5, l_prime, multipole, q);

    let reference =
        radial_integral_with_config(&request, IntegrationMethod::Quadosc, &config).unwrap();
    let value = radial_integral_with_config(&request, method, &config).unwrap();

    assert!(reference.is_finite());
    assert_relative_eq!(value, reference, epsilon = 1e-5, max_relative = 1e-2);
}

#[test]
fn test_derivative_methods_agree() {
    let element = helium_ion();
    let config = IntegrationConfig::atomic_units();
    let request = IntegralRequest::new(IntegralKind::Derivative, &element, 1, 0, 0.5, 1, 0, 4.0);

    let reference =
        radial_integral_with_config(&request, IntegrationMethod::Quadosc, &config).unwrap();
    for method in [
        IntegrationMethod::Hankel,
        IntegrationMethod::TanhSinhStepwise,
        IntegrationMethod::NumpyStepwise,
    ] {
        let value = radial_integral_with_config(&request, method, &config).unwrap();
        assert_relative_eq!(value, reference, epsilon = 1e-5, max_relative = 1e-2);
    }
}

#[test]
fn test_analytic_derivative_is_zero() {
    let element = helium_ion();
    let config = IntegrationConfig::atomic_units();
    let request = IntegralRequest::new(IntegralKind::Derivative, &element, 1, 0, 0.5, 1, 0, 4.0);

    let value = radial_integral_with_config(&request, IntegrationMethod::Analytic, &config).unwrap();
    assert_eq!(value, 0.0);
}

#[test]
fn test_analytic_reports_non_convergence() {
    // 2k/|Z + i(k - q)| > 1, so the series terms grow without bound
    let element = Element::hydrogen_like(1)
        .unwrap()
        .with_constants(PhysicalConstants::atomic());
    let config = IntegrationConfig::atomic_units();
    let request = IntegralRequest::new(IntegralKind::Radial, &element, 1, 0, 3.0, 0, 0, 1.0);

    match analytic_series(&request, &config).unwrap() {
        SeriesOutcome::NotConverged { terms } => assert!(terms > 1),
        other => panic!("series should not converge, got {:?}", other),
    }

    let err = radial_integral_with_config(&request, IntegrationMethod::Analytic, &config)
        .unwrap_err();
    assert!(matches!(err, IntegralError::NonConvergence { .. }));
    assert!(err.is_missing_result());
}

#[test]
fn test_stepwise_is_repeatable() {
    let element = helium_ion();
    let config = IntegrationConfig::atomic_units();
    let request = IntegralRequest::new(IntegralKind::Radial, &element, 1, 0, 0.5, 1, 1, 4.0);

    for method in [IntegrationMethod::NumpyStepwise, IntegrationMethod::TanhSinhStepwise] {
        let first = radial_integral_with_config(&request, method, &config).unwrap();
        let second = radial_integral_with_config(&request, method, &config).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }
}

#[test]
fn test_method_lookup_by_name() {
    let element = helium_ion();
    let config = IntegrationConfig::atomic_units();
    let request = IntegralRequest::new(IntegralKind::Radial, &element, 1, 0, 0.5, 0, 0, 4.0);

    let by_name = radial_integral_by_name(&request, "numpy-stepwise", &config).unwrap();
    let direct =
        radial_integral_with_config(&request, IntegrationMethod::NumpyStepwise, &config).unwrap();
    assert_eq!(by_name, direct);

    let err = radial_integral_by_name(&request, "simpson", &config).unwrap_err();
    assert!(matches!(err, IntegralError::UnknownMethod(ref name) if name == "simpson"));
}

#[rstest]
#[case(0.0, 4.0)]
#[case(0.5, 0.0)]
#[case(-1.0, 4.0)]
#[case(0.5, f64::NAN)]
fn test_invalid_momenta_rejected(#[case] k: f64, #[case] q: f64) {
    let element = helium_ion();
    let config = IntegrationConfig::atomic_units();
    let request = IntegralRequest::new(IntegralKind::Radial, &element, 1, 0, k, 0, 0, q);

    for method in IntegrationMethod::ALL {
        let err = radial_integral_with_config(&request, method, &config).unwrap_err();
        assert!(matches!(err, IntegralError::InvalidRequest(_)));
    }
}

#[test]
fn test_missing_shell_rejected() {
    let element = helium_ion();
    let config = IntegrationConfig::atomic_units();
    let request = IntegralRequest::new(IntegralKind::Radial, &element, 2, 1, 0.5, 0, 1, 4.0);

    let err =
        radial_integral_with_config(&request, IntegrationMethod::Quadosc, &config).unwrap_err();
    assert!(matches!(err, IntegralError::InvalidRequest(_)));
}

#[test]
fn test_unit_mismatch_rejected() {
    // Element in natural units, configuration in atomic units
    let element = Element::hydrogen_like(2).unwrap();
    let config = IntegrationConfig::atomic_units();
    let request = IntegralRequest::new(IntegralKind::Radial, &element, 1, 0, 0.5, 0, 0, 4.0);

    let err =
        radial_integral_with_config(&request, IntegrationMethod::Numpy, &config).unwrap_err();
    assert!(matches!(err, IntegralError::InvalidRequest(_)));
}

#[test]
fn test_custom_continuum() {
    let element = helium_ion();
    let config = IntegrationConfig::atomic_units();
    let plane_wave = PlaneWave;
    let request = IntegralRequest::new(IntegralKind::Radial, &element, 1, 0, 0.5, 0, 0, 4.0)
        .with_continuum(&plane_wave);

    let reference =
        radial_integral_with_config(&request, IntegrationMethod::Quadosc, &config).unwrap();
    let stepwise =
        radial_integral_with_config(&request, IntegrationMethod::NumpyStepwise, &config).unwrap();
    assert_relative_eq!(stepwise, reference, epsilon = 1e-5, max_relative = 1e-2);

    let coulomb = radial_integral_with_config(
        &IntegralRequest::new(IntegralKind::Radial, &element, 1, 0, 0.5, 0, 0, 4.0),
        IntegrationMethod::Quadosc,
        &config,
    )
    .unwrap();
    assert!((coulomb - reference).abs() > 1e-6);

    let err =
        radial_integral_with_config(&request, IntegrationMethod::Analytic, &config).unwrap_err();
    assert!(matches!(err, IntegralError::AnalyticUnavailable(_)));
}
