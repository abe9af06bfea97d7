/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! # radint-rs
//!
//! Radial transition integrals for atomic ionization form factors.
//!
//! Ionization form factors for dark-matter and electron scattering need
//! integrals of a bound radial wavefunction (or its derivative), a continuum
//! wavefunction and a spherical Bessel function of the momentum transfer,
//! tabulated over thousands of (n, l, l′, L, k, q) combinations. The
//! integrand is oscillatory and no single numerical method is reliable
//! everywhere, so this crate provides seven independent methods and an
//! arbiter that cross-validates them and picks the fastest trustworthy one.
//!
//! ```no_run
//! use radint_rs::atoms::Element;
//! use radint_rs::integrals::{
//!     evaluate_integration_methods_with_config, IntegralKind, IntegralRequest,
//!     IntegrationConfig,
//! };
//!
//! let config = IntegrationConfig::atomic_units();
//! let helium = Element::hydrogen_like(2)?.with_constants(config.constants);
//! let request = IntegralRequest::new(IntegralKind::Radial, &helium, 1, 0, 0.5, 1, 1, 4.0);
//! let best = evaluate_integration_methods_with_config(&request, false, &config)?;
//! println!("fastest validated method: {}", best);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod atoms;
pub mod cli;
pub mod continuum;
pub mod integrals;
pub mod utils;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

pub use integrals::{
    evaluate_integration_methods, radial_integral, IntegralKind, IntegralRequest,
    IntegrationConfig, IntegrationMethod,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_information() {
        assert!(!VERSION.is_empty());
        assert_eq!(AUTHORS, "Ameyanagi");
    }
}
