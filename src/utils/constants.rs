/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Physical constants used in radial integral calculations
//!
//! Natural units are used throughout (ħ = c = 1, energies and momenta in eV,
//! lengths in eV⁻¹). The [`PhysicalConstants`] value bundles the unit-dependent
//! quantities so a calculation can be run in natural or atomic units without
//! touching global state.

use serde::{Deserialize, Serialize};

/// Fine-structure constant (CODATA 2018)
pub const FINE_STRUCTURE: f64 = 1.0 / 137.035999084;

/// Electron mass in eV
pub const ELECTRON_MASS_EV: f64 = 510_998.950;

/// Rydberg energy in eV
pub const RYDBERG: f64 = 13.605693;

/// One keV in natural units
pub const KEV: f64 = 1.0e3;

/// Bohr radius in natural units (eV⁻¹)
pub const BOHR_RADIUS: f64 = 1.0 / (FINE_STRUCTURE * ELECTRON_MASS_EV);

/// Unit-dependent constants consumed by the integration methods
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalConstants {
    /// Bohr radius a0
    pub bohr_radius: f64,
    /// One keV of momentum
    pub kev: f64,
}

impl PhysicalConstants {
    /// Natural units: momenta in eV, lengths in eV⁻¹
    pub fn natural() -> Self {
        Self {
            bohr_radius: BOHR_RADIUS,
            kev: KEV,
        }
    }

    /// Atomic units: lengths in Bohr radii, momenta in inverse Bohr radii
    pub fn atomic() -> Self {
        Self {
            bohr_radius: 1.0,
            kev: KEV * BOHR_RADIUS,
        }
    }
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self::natural()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bohr_radius_in_natural_units() {
        // a0 = 1/(α m_e) ≈ 2.6817e-4 eV⁻¹
        assert_relative_eq!(BOHR_RADIUS, 2.6817268e-4, max_relative = 1e-6);
    }

    #[test]
    fn test_unit_systems_agree_on_dimensionless_products() {
        let natural = PhysicalConstants::natural();
        let atomic = PhysicalConstants::atomic();
        assert_relative_eq!(
            natural.kev * natural.bohr_radius,
            atomic.kev * atomic.bohr_radius,
            max_relative = 1e-12
        );
    }
}
