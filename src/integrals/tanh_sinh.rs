/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Tanh-sinh methods: one fixed interval, or unit windows until converged

use super::config::IntegrationConfig;
use super::errors::Result;
use super::integrand::Integrand;
use super::stepwise::{sum_windows, StepwiseSettings};
use super::IntegrationMethod;
use crate::utils::quadrature::integrate_tanh_sinh;
use log::debug;

/// Integrate over [0, fixed_range·a0]
pub(crate) fn integrate(integrand: &Integrand<'_>, config: &IntegrationConfig) -> Result<f64> {
    let upper = config.fixed_range_bohr * config.constants.bohr_radius;
    let result = integrate_tanh_sinh(
        &|r: f64| integrand.primary(r),
        0.0,
        upper,
        config.tanh_sinh_tolerance,
        config.tanh_sinh_max_level,
    );
    if !result.converged {
        debug!(
            "tanh-sinh stopped at max level with change {:e}",
            result.error
        );
    }
    Ok(result.value)
}

/// Integrate window by window until two windows are negligible
pub(crate) fn integrate_stepwise(
    integrand: &Integrand<'_>,
    config: &IntegrationConfig,
) -> Result<f64> {
    let settings = StepwiseSettings {
        method: IntegrationMethod::TanhSinhStepwise,
        window: config.window_bohr * config.constants.bohr_radius,
        tolerance: config.stepwise_tolerance,
        min_windows: config.stepwise_min_windows,
        max_windows: config.stepwise_max_windows,
    };
    let (value, windows) = sum_windows(&settings, |lower, upper| {
        integrate_tanh_sinh(
            &|r: f64| integrand.primary(r),
            lower,
            upper,
            config.tanh_sinh_tolerance,
            config.tanh_sinh_max_level,
        )
        .value
    })?;
    debug!("tanh-sinh-stepwise used {} windows", windows);
    Ok(value)
}
