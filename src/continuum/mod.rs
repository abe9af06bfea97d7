/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Final-state (continuum) side of the radial integrand
//!
//! The ionised electron is described by a continuum radial function
//! R_{k l'}(r) in the field of an effective charge Z_eff. The default model,
//! [`CoulombContinuum`], uses regular Coulomb waves normalised as
//! R = 4π F_{l'}(η, kr)/(kr) with η = −Z_eff/(k a0).

pub mod coulomb;

use crate::utils::constants::PhysicalConstants;
use std::f64::consts::PI;

/// Continuum radial wavefunctions of the outgoing electron
pub trait ContinuumModel {
    /// Radial function R_{k l'}(r) for effective charge `z_eff`
    fn radial(&self, r: f64, k: f64, l_prime: u32, z_eff: f64) -> f64;

    /// Numerically distinct evaluation of the same function
    fn radial_alternative(&self, r: f64, k: f64, l_prime: u32, z_eff: f64) -> f64 {
        self.radial(r, k, l_prime, z_eff)
    }
}

/// Coulomb continuum states of a hydrogen-like potential −Z_eff/r
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoulombContinuum {
    bohr_radius: f64,
}

impl CoulombContinuum {
    /// Continuum model in the given unit system
    pub fn new(constants: PhysicalConstants) -> Self {
        Self {
            bohr_radius: constants.bohr_radius,
        }
    }

    /// Sommerfeld parameter η = −Z_eff/(k a0) (negative for attraction)
    pub fn sommerfeld_parameter(&self, k: f64, z_eff: f64) -> f64 {
        -z_eff / (k * self.bohr_radius)
    }
}

impl Default for CoulombContinuum {
    fn default() -> Self {
        Self::new(PhysicalConstants::default())
    }
}

impl ContinuumModel for CoulombContinuum {
    fn radial(&self, r: f64, k: f64, l_prime: u32, z_eff: f64) -> f64 {
        let eta = self.sommerfeld_parameter(k, z_eff);
        coulomb::reduced_coulomb(l_prime, eta, k * r)
            .map(|reduced| 4.0 * PI * reduced)
            .unwrap_or(f64::NAN)
    }

    fn radial_alternative(&self, r: f64, k: f64, l_prime: u32, z_eff: f64) -> f64 {
        let eta = self.sommerfeld_parameter(k, z_eff);
        coulomb::reduced_coulomb_kummer(l_prime, eta, k * r)
            .map(|reduced| 4.0 * PI * reduced)
            .unwrap_or(f64::NAN)
    }
}
