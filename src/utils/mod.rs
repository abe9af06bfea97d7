/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Utility functions for radial integral calculations
//!
//! This module provides the physical constants, special functions and
//! quadrature engines used throughout the crate.

pub mod constants;
pub mod errors;
pub mod math;
pub mod quadrature;

pub use constants::PhysicalConstants;
pub use errors::{Result, UtilsError};

/// Convert a binding energy to an effective charge, Z_eff = n √(E_B / Ry)
pub fn effective_charge(principal_n: u32, binding_energy_ev: f64) -> f64 {
    principal_n as f64 * (binding_energy_ev / constants::RYDBERG).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_effective_charge() {
        assert_relative_eq!(effective_charge(1, constants::RYDBERG), 1.0, epsilon = 1e-12);
        assert_relative_eq!(
            effective_charge(2, 4.0 * constants::RYDBERG),
            4.0,
            epsilon = 1e-12
        );
    }
}
