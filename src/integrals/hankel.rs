/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Hankel-transform method
//!
//! With j_L(x) = √(π/2x) J_{L+1/2}(x) the radial integral becomes a Hankel
//! transform of order L + 1/2 evaluated at q. Node count and step are fixed.

use super::config::IntegrationConfig;
use super::errors::Result;
use super::integrand::Integrand;
use crate::utils::quadrature::HankelTransform;

pub(crate) fn integrate(integrand: &Integrand<'_>, config: &IntegrationConfig) -> Result<f64> {
    let transform = HankelTransform::new(
        integrand.multipole as i32,
        config.hankel_nodes,
        config.hankel_step,
    )?;
    Ok(transform.transform(|r| integrand.hankel_profile(r), integrand.q))
}
