/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Bound-state side of the radial integrand
//!
//! The integration methods only see the [`BoundStateModel`] trait. [`Element`]
//! implements it from Roothaan–Hartree–Fock Slater-type orbital tables.

pub mod element;
pub mod errors;
pub mod sto;

pub use element::Element;
pub use errors::{ElementError, Result};
pub use sto::StoExpansion;

/// Bound radial wavefunctions of an atom's occupied shells
///
/// Implementations must be pure: repeated calls with the same arguments
/// return the same value, and no method mutates shared state.
pub trait BoundStateModel {
    /// Radial function R_nl(r)
    fn radial(&self, n: u32, l: u32, r: f64) -> f64;

    /// Derivative dR_nl/dr
    fn radial_derivative(&self, n: u32, l: u32, r: f64) -> f64;

    /// Numerically distinct evaluation of R_nl(r)
    fn radial_alternative(&self, n: u32, l: u32, r: f64) -> f64 {
        self.radial(n, l, r)
    }

    /// Numerically distinct evaluation of dR_nl/dr
    fn radial_derivative_alternative(&self, n: u32, l: u32, r: f64) -> f64 {
        self.radial_derivative(n, l, r)
    }

    /// Effective nuclear charge seen by the ionised electron (> 0)
    fn z_effective(&self, n: u32, l: u32) -> f64;

    /// STO expansion of shell (n, l), if the model has one
    fn sto_expansion(&self, _n: u32, _l: u32) -> Option<StoExpansion> {
        None
    }

    /// Whether shell (n, l) exists in this model
    fn contains_shell(&self, n: u32, l: u32) -> bool;

    /// Bohr radius in the model's length unit
    fn bohr_radius(&self) -> f64;

    /// Human-readable name used in logs
    fn name(&self) -> &str {
        "bound state"
    }
}
