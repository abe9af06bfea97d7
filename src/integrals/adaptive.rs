/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Adaptive Gauss–Kronrod methods ("numpy" and "numpy-stepwise")
//!
//! Both use the alternative wavefunction forms.

use super::config::IntegrationConfig;
use super::errors::Result;
use super::integrand::Integrand;
use super::stepwise::{sum_windows, StepwiseSettings};
use super::IntegrationMethod;
use crate::utils::quadrature::integrate_adaptive;
use log::debug;

/// Integrate over [0, fixed_range·a0]
pub(crate) fn integrate(integrand: &Integrand<'_>, config: &IntegrationConfig) -> Result<f64> {
    let upper = config.fixed_range_bohr * config.constants.bohr_radius;
    let result = integrate_adaptive(
        &|r: f64| integrand.alternative(r),
        0.0,
        upper,
        config.adaptive_abs_tolerance,
        config.adaptive_rel_tolerance,
        config.adaptive_max_subdivisions,
    );
    if !result.converged {
        debug!(
            "numpy reached {} subdivisions, error estimate {:e}",
            config.adaptive_max_subdivisions, result.error
        );
    }
    Ok(result.value)
}

/// Integrate window by window with a loose per-window tolerance
pub(crate) fn integrate_stepwise(
    integrand: &Integrand<'_>,
    config: &IntegrationConfig,
) -> Result<f64> {
    let settings = StepwiseSettings {
        method: IntegrationMethod::NumpyStepwise,
        window: config.window_bohr * config.constants.bohr_radius,
        tolerance: config.stepwise_tolerance,
        min_windows: config.stepwise_min_windows,
        max_windows: config.stepwise_max_windows,
    };
    let (value, windows) = sum_windows(&settings, |lower, upper| {
        integrate_adaptive(
            &|r: f64| integrand.alternative(r),
            lower,
            upper,
            config.adaptive_abs_tolerance,
            config.window_relative_tolerance,
            config.adaptive_max_subdivisions,
        )
        .value
    })?;
    debug!("numpy-stepwise used {} windows", windows);
    Ok(value)
}
