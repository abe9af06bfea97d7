/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Slater-type orbital expansions
//!
//! A bound radial function is written as a finite sum of normalised Slater
//! functions
//!
//! R(r) = Σ_j C_j · (2Z_j/a0)^{n_j+½} / √((2n_j)!) · r^{n_j−1} · e^{−Z_j r/a0}

use crate::utils::math::ln_gamma;
use serde::{Deserialize, Serialize};

/// One radial function expanded in Slater-type orbitals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoExpansion {
    /// Expansion coefficients C_j
    pub coefficients: Vec<f64>,
    /// Orbital exponents Z_j (dimensionless, in units of 1/a0)
    pub exponents: Vec<f64>,
    /// Principal quantum numbers n_j of the basis functions
    pub powers: Vec<u32>,
}

impl StoExpansion {
    /// Number of basis functions
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    /// Whether the expansion has no terms
    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Iterate over (C_j, Z_j, n_j)
    pub fn terms(&self) -> impl Iterator<Item = (f64, f64, u32)> + '_ {
        self.coefficients
            .iter()
            .zip(&self.exponents)
            .zip(&self.powers)
            .map(|((&c, &z), &n)| (c, z, n))
    }

    /// Evaluate R(r) with direct powers
    pub fn radial(&self, r: f64, bohr_radius: f64) -> f64 {
        sum_radial(self.terms(), r, bohr_radius)
    }

    /// Evaluate dR/dr with direct powers
    pub fn radial_derivative(&self, r: f64, bohr_radius: f64) -> f64 {
        sum_radial_derivative(self.terms(), r, bohr_radius)
    }

    /// Evaluate R(r) term by term in log space
    ///
    /// Avoids overflow of (2Z/a0)^{n+½} for tightly bound shells when lengths
    /// are small numbers, as in natural units.
    pub fn radial_log_space(&self, r: f64, bohr_radius: f64) -> f64 {
        sum_radial_log_space(self.terms(), r, bohr_radius)
    }

    /// Evaluate dR/dr term by term in log space
    pub fn radial_derivative_log_space(&self, r: f64, bohr_radius: f64) -> f64 {
        sum_radial_derivative_log_space(self.terms(), r, bohr_radius)
    }
}

/// R(r) from (C_j, Z_j, n_j) triples
pub(crate) fn sum_radial<I>(terms: I, r: f64, bohr_radius: f64) -> f64
where
    I: Iterator<Item = (f64, f64, u32)>,
{
    terms
        .map(|(c, z, n)| {
            let zeta = z / bohr_radius;
            c * normalization(z, n, bohr_radius) * r.powi(n as i32 - 1) * (-zeta * r).exp()
        })
        .sum()
}

/// dR/dr from (C_j, Z_j, n_j) triples
pub(crate) fn sum_radial_derivative<I>(terms: I, r: f64, bohr_radius: f64) -> f64
where
    I: Iterator<Item = (f64, f64, u32)>,
{
    terms
        .map(|(c, z, n)| {
            let zeta = z / bohr_radius;
            let mut shape = -zeta * r.powi(n as i32 - 1);
            if n > 1 {
                shape += (n - 1) as f64 * r.powi(n as i32 - 2);
            }
            c * normalization(z, n, bohr_radius) * shape * (-zeta * r).exp()
        })
        .sum()
}

/// R(r) from (C_j, Z_j, n_j) triples, each term in log space
pub(crate) fn sum_radial_log_space<I>(terms: I, r: f64, bohr_radius: f64) -> f64
where
    I: Iterator<Item = (f64, f64, u32)>,
{
    terms
        .map(|(c, z, n)| {
            if c == 0.0 {
                return 0.0;
            }
            let mut log_term =
                c.abs().ln() + log_normalization(z, n, bohr_radius) - z * r / bohr_radius;
            if n > 1 {
                if r <= 0.0 {
                    return 0.0;
                }
                log_term += (n - 1) as f64 * r.ln();
            }
            c.signum() * log_term.exp()
        })
        .sum()
}

/// dR/dr from (C_j, Z_j, n_j) triples, each term in log space
pub(crate) fn sum_radial_derivative_log_space<I>(terms: I, r: f64, bohr_radius: f64) -> f64
where
    I: Iterator<Item = (f64, f64, u32)>,
{
    terms
        .map(|(c, z, n)| {
            if c == 0.0 {
                return 0.0;
            }
            let zeta = z / bohr_radius;
            let log_base = c.abs().ln() + log_normalization(z, n, bohr_radius) - zeta * r;
            // d/dr r^{n-1} e^{-ζr} = ((n-1)/r - ζ) r^{n-1} e^{-ζr}
            let decay = if n > 1 {
                if r <= 0.0 {
                    return if n == 2 {
                        c.signum() * log_base.exp()
                    } else {
                        0.0
                    };
                }
                let log_power = log_base + (n - 1) as f64 * r.ln();
                ((n - 1) as f64 / r - zeta) * log_power.exp()
            } else {
                -zeta * log_base.exp()
            };
            c.signum() * decay
        })
        .sum()
}

/// (2Z/a0)^{n+½} / √((2n)!)
fn normalization(z: f64, n: u32, bohr_radius: f64) -> f64 {
    log_normalization(z, n, bohr_radius).exp()
}

fn log_normalization(z: f64, n: u32, bohr_radius: f64) -> f64 {
    (n as f64 + 0.5) * (2.0 * z / bohr_radius).ln() - 0.5 * ln_gamma(2.0 * n as f64 + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::quadrature::integrate_adaptive;
    use approx::assert_relative_eq;

    fn two_term() -> StoExpansion {
        StoExpansion {
            coefficients: vec![0.8, -0.3],
            exponents: vec![2.5, 1.1],
            powers: vec![2, 3],
        }
    }

    #[test]
    fn test_single_sto_is_normalised() {
        let sto = StoExpansion {
            coefficients: vec![1.0],
            exponents: vec![1.7],
            powers: vec![3],
        };
        let norm = integrate_adaptive(
            &|r: f64| {
                let value = sto.radial(r, 1.0);
                r * r * value * value
            },
            0.0,
            60.0,
            1e-13,
            1e-12,
            100,
        );
        assert_relative_eq!(norm.value, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_log_space_matches_direct() {
        let sto = two_term();
        for &r in &[0.0, 0.1, 0.7, 2.0, 9.0] {
            assert_relative_eq!(
                sto.radial_log_space(r, 1.0),
                sto.radial(r, 1.0),
                epsilon = 1e-12,
                max_relative = 1e-12
            );
            assert_relative_eq!(
                sto.radial_derivative_log_space(r, 1.0),
                sto.radial_derivative(r, 1.0),
                epsilon = 1e-12,
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        let sto = two_term();
        let h = 1e-5;
        for &r in &[0.3, 1.0, 4.0] {
            let numeric = (sto.radial(r + h, 1.0) - sto.radial(r - h, 1.0)) / (2.0 * h);
            assert_relative_eq!(sto.radial_derivative(r, 1.0), numeric, epsilon = 1e-8);
        }
    }
}
