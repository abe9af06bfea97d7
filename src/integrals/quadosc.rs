/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Oscillatory quadrature over [0, ∞)
//!
//! The frequency handed to the half-period quadrature is
//! max(k, q, keV)/2π, a lower bound on how fast the integrand oscillates.

use super::config::IntegrationConfig;
use super::errors::Result;
use super::integrand::Integrand;
use crate::utils::quadrature::integrate_oscillatory;
use log::{debug, warn};
use std::f64::consts::PI;

pub(crate) fn integrate(integrand: &Integrand<'_>, config: &IntegrationConfig) -> Result<f64> {
    let frequency = integrand
        .k
        .max(integrand.q)
        .max(config.constants.kev)
        / (2.0 * PI);

    let result = integrate_oscillatory(
        &|r: f64| integrand.primary(r),
        0.0,
        frequency,
        config.oscillatory_tolerance,
        config.oscillatory_max_half_periods,
    )?;

    if result.converged {
        debug!(
            "quadosc settled after {} half periods (change {:e})",
            result.half_periods, result.error
        );
    } else {
        warn!(
            "quadosc did not settle within {} half periods, last change {:e}",
            result.half_periods, result.error
        );
    }

    Ok(result.value)
}
