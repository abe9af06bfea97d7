/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Radial integrand assembled from the bound and continuum models

use super::{IntegralKind, IntegralRequest};
use crate::atoms::BoundStateModel;
use crate::continuum::ContinuumModel;
use crate::utils::math::spherical_bessel_j;
use std::f64::consts::PI;

/// Everything needed to evaluate the integrand at a radius r
pub(crate) struct Integrand<'a> {
    pub kind: IntegralKind,
    shell: &'a dyn BoundStateModel,
    continuum: &'a dyn ContinuumModel,
    n: u32,
    l: u32,
    pub k: f64,
    l_prime: u32,
    pub multipole: u32,
    pub q: f64,
    z_eff: f64,
}

impl<'a> Integrand<'a> {
    pub fn new(request: &IntegralRequest<'a>, continuum: &'a dyn ContinuumModel) -> Self {
        Self {
            kind: request.kind,
            shell: request.shell,
            continuum,
            n: request.n,
            l: request.l,
            k: request.k,
            l_prime: request.l_prime,
            multipole: request.multipole,
            q: request.q,
            z_eff: request.shell.z_effective(request.n, request.l),
        }
    }

    fn bessel(&self, r: f64) -> f64 {
        spherical_bessel_j(self.multipole as i32, self.q * r).unwrap_or(f64::NAN)
    }

    /// Integrand from the primary wavefunction forms
    pub fn primary(&self, r: f64) -> f64 {
        let final_state = self.continuum.radial(r, self.k, self.l_prime, self.z_eff);
        let weight = match self.kind {
            IntegralKind::Radial => r * r * self.shell.radial(self.n, self.l, r),
            IntegralKind::Derivative => r * r * self.shell.radial_derivative(self.n, self.l, r),
            IntegralKind::Reduced => r * self.shell.radial(self.n, self.l, r),
        };
        weight * final_state * self.bessel(r)
    }

    /// Integrand from the alternative wavefunction forms
    pub fn alternative(&self, r: f64) -> f64 {
        let final_state = self
            .continuum
            .radial_alternative(r, self.k, self.l_prime, self.z_eff);
        let weight = match self.kind {
            IntegralKind::Radial => r * r * self.shell.radial_alternative(self.n, self.l, r),
            IntegralKind::Derivative => {
                r * r * self.shell.radial_derivative_alternative(self.n, self.l, r)
            }
            IntegralKind::Reduced => r * self.shell.radial_alternative(self.n, self.l, r),
        };
        weight * final_state * self.bessel(r)
    }

    /// f(r) such that the integral equals ∫ f(r) J_{L+1/2}(qr) r dr
    pub fn hankel_profile(&self, r: f64) -> f64 {
        let final_state = self
            .continuum
            .radial_alternative(r, self.k, self.l_prime, self.z_eff);
        let (bound, scale) = match self.kind {
            IntegralKind::Radial => (
                self.shell.radial_alternative(self.n, self.l, r),
                (PI * r / (2.0 * self.q)).sqrt(),
            ),
            IntegralKind::Derivative => (
                self.shell.radial_derivative_alternative(self.n, self.l, r),
                (PI * r / (2.0 * self.q)).sqrt(),
            ),
            IntegralKind::Reduced => (
                self.shell.radial_alternative(self.n, self.l, r),
                (PI / (2.0 * self.q * r)).sqrt(),
            ),
        };
        scale * bound * final_state
    }
}
