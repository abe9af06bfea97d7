/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Analytic series for STO bound states
//!
//! Expanding the Coulomb wave through its Kummer series
//! R_f = 4π (2k)^{l′} C r^{l′} e^{−ikr} Σ_S (a)_S/((b)_S S!) (2ikr)^S
//! with a = l′+1+iη, b = 2l′+2, η = Z_eff/(k a0), turns every STO term into
//! moments F_α(β, q) = ∫ r^α e^{−βr} j_L(qr) dr with β = Z_j/a0 + ik.
//! Terms are accumulated in log space. Only kinds 1 and 3 have a series;
//! kind 2 is 0 by construction.
//!
//! The moments are generated by the three-term recurrence
//! (β²+q²) F_{m+2} = 2β(m+1) F_{m+1} − (m−L)(m+L+1) F_m,
//! started from F_{L+1} = (2q)^L L!/(β²+q²)^{L+1}. Forward recurrence is
//! stable here because F_m carries the dominant solution, and values are
//! stored scaled by s^{m+1}/m! to stay in range.

use super::config::IntegrationConfig;
use super::errors::{IntegralError, Result};
use super::{IntegralKind, IntegralRequest};
use crate::utils::errors::UtilsError;
use crate::utils::math::{hyp2f1, ln_gamma, ln_gamma_complex};
use log::debug;
use num_complex::Complex64;
use std::f64::consts::PI;

/// Outcome of a truncated series
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeriesOutcome {
    /// The newest terms fell below tolerance
    Converged {
        /// Real part of the summed series
        value: f64,
        /// Terms summed
        terms: usize,
    },
    /// The term cap was reached first
    NotConverged {
        /// Terms summed before giving up
        terms: usize,
    },
}

impl SeriesOutcome {
    /// The value, if the series converged
    pub fn value(&self) -> Option<f64> {
        match self {
            SeriesOutcome::Converged { value, .. } => Some(*value),
            SeriesOutcome::NotConverged { .. } => None,
        }
    }
}

/// Sum the analytic series for a request
pub fn analytic_series(
    request: &IntegralRequest<'_>,
    config: &IntegrationConfig,
) -> Result<SeriesOutcome> {
    request.validate(config)?;
    integrate(request, config)
}

pub(crate) fn integrate(
    request: &IntegralRequest<'_>,
    config: &IntegrationConfig,
) -> Result<SeriesOutcome> {
    if request.kind == IntegralKind::Derivative {
        return Ok(SeriesOutcome::Converged {
            value: 0.0,
            terms: 0,
        });
    }

    if request.continuum.is_some() {
        return Err(IntegralError::AnalyticUnavailable(
            "the series is derived for Coulomb continuum states only".to_string(),
        ));
    }

    let sto = request
        .shell
        .sto_expansion(request.n, request.l)
        .ok_or_else(|| {
            IntegralError::AnalyticUnavailable(format!(
                "{} provides no STO expansion for n={}, l={}",
                request.shell.name(),
                request.n,
                request.l
            ))
        })?;

    let a0 = config.constants.bohr_radius;
    let k = request.k;
    let q = request.q;
    let l_prime = request.l_prime as f64;
    let multipole = request.multipole;
    let max_terms = config.analytic_max_terms;
    let extra_power = u32::from(request.kind == IntegralKind::Radial);

    let eta = request.shell.z_effective(request.n, request.l) / (k * a0);
    let a = Complex64::new(l_prime + 1.0, eta);
    let b = 2.0 * l_prime + 2.0;
    let ln_2k = (2.0 * k).ln();
    let ln_2ik = Complex64::new(ln_2k, 0.5 * PI);

    // S-independent part of every term
    let ln_common = (4.0 * PI).ln()
        + l_prime * ln_2k
        + ln_gamma_complex(Complex64::new(l_prime + 1.0, -eta)).re
        - ln_gamma_complex(a)
        + 0.5 * PI * eta;

    // Per basis function: prefactor and scaled moments up to the largest order needed
    let mut basis = Vec::with_capacity(sto.len());
    for (coefficient, exponent, power) in sto.terms() {
        let lowest_order = request.l_prime + power + extra_power;
        if lowest_order < multipole {
            return Err(IntegralError::AnalyticUnavailable(format!(
                "moment order {} below the multipole order {} is not supported by the series",
                lowest_order, multipole
            )));
        }
        let beta = Complex64::new(exponent / a0, k);
        let ln_norm = (power as f64 + 0.5) * (2.0 * exponent / a0).ln()
            - 0.5 * ln_gamma(2.0 * power as f64 + 1.0);
        let moments = Moments::new(beta, q, multipole, lowest_order, lowest_order + max_terms as u32)?;
        basis.push((coefficient, ln_norm, lowest_order, moments));
    }

    let mut result = Complex64::new(0.0, 0.0);
    let mut latest = 1.0_f64;
    let mut previous;
    let mut s = 0usize;

    while s <= max_terms {
        previous = latest;
        let sf = s as f64;
        let ln_s_part = ln_common + ln_2ik * sf + ln_gamma_complex(a + sf)
            - ln_gamma(sf + 1.0)
            - ln_gamma(sf + b);

        let mut term = Complex64::new(0.0, 0.0);
        for (coefficient, ln_norm, lowest_order, moments) in basis.iter() {
            let order = *lowest_order + s as u32;
            term += *coefficient * (ln_s_part + *ln_norm + moments.ln_moment(order)).exp();
        }

        if !(term.re.is_finite() && term.im.is_finite()) {
            debug!("analytic series produced a non-finite term at S={}", s);
            return Ok(SeriesOutcome::NotConverged { terms: s + 1 });
        }

        result += term;
        latest = if result.norm() > 0.0 {
            term.norm() / result.norm()
        } else if term.norm() == 0.0 {
            0.0
        } else {
            f64::INFINITY
        };
        s += 1;

        if latest <= config.analytic_tolerance && previous <= config.analytic_tolerance {
            break;
        }
    }

    if s > max_terms {
        debug!("analytic series hit the {} term cap", max_terms);
        return Ok(SeriesOutcome::NotConverged { terms: s });
    }

    Ok(SeriesOutcome::Converged {
        value: result.re,
        terms: s,
    })
}

/// Moments F_m(β, q) = ∫ r^m e^{−βr} j_L(qr) dr for a range of orders
struct Moments {
    multipole: u32,
    /// ln s with s = min|β ∓ iq|
    ln_scale: f64,
    /// G_m = F_m s^{m+1}/m! for m = L+1 ..= highest
    scaled: Vec<Complex64>,
    /// ln F_L, present only when order L is requested
    ln_lowest: Option<Complex64>,
}

impl Moments {
    fn new(beta: Complex64, q: f64, multipole: u32, lowest: u32, highest: u32) -> Result<Self> {
        let i_q = Complex64::new(0.0, q);
        let scale = (beta - i_q).norm().min((beta + i_q).norm());
        let ln_scale = scale.ln();
        let denominator = beta * beta + q * q;
        let l = multipole as f64;

        // G_{L+1} from the closed form of F_{L+1}
        let ln_first = l * (2.0 * q).ln() + ln_gamma(l + 1.0) - denominator.ln() * (l + 1.0)
            + (l + 2.0) * ln_scale
            - ln_gamma(l + 2.0);

        let count = highest.saturating_sub(multipole) as usize;
        let mut scaled = Vec::with_capacity(count);
        if count > 0 {
            scaled.push(ln_first.exp());
        }
        // G_m for m = L (coefficient vanishes) feeds only the first step
        let mut g_prev = Complex64::new(0.0, 0.0);
        let mut m = l;
        while scaled.len() < count {
            let g_curr = scaled[scaled.len() - 1];
            let next = (beta * (2.0 * scale * (m + 1.0) / (m + 2.0)) * g_curr
                - g_prev * (scale * scale * (m - l) * (m + l + 1.0) / ((m + 1.0) * (m + 2.0))))
                / denominator;
            g_prev = g_curr;
            scaled.push(next);
            m += 1.0;
        }

        let ln_lowest = if lowest == multipole {
            Some(ln_moment_at_multipole(beta, q, multipole)?)
        } else {
            None
        };

        Ok(Self {
            multipole,
            ln_scale,
            scaled,
            ln_lowest,
        })
    }

    /// ln F_m for a requested order m ≥ L
    fn ln_moment(&self, order: u32) -> Complex64 {
        if order == self.multipole {
            return self
                .ln_lowest
                .unwrap_or(Complex64::new(f64::NEG_INFINITY, 0.0));
        }
        let index = (order - self.multipole - 1) as usize;
        match self.scaled.get(index) {
            Some(g) => {
                let m = order as f64;
                g.ln() + ln_gamma(m + 1.0) - (m + 1.0) * self.ln_scale
            }
            None => Complex64::new(f64::NAN, 0.0),
        }
    }
}

/// ln F_L = ln[√π/2^{L+1} q^L (2L)!/Γ(L+3/2) β^{−(2L+1)} ₂F₁(L+½, L+1; L+3/2; −q²/β²)]
fn ln_moment_at_multipole(beta: Complex64, q: f64, multipole: u32) -> Result<Complex64> {
    let l = multipole as f64;
    let z = -(q / beta) * (q / beta);
    let hypergeometric = hyp2f1(l + 0.5, l + 1.0, l + 1.5, z).map_err(|e| match e {
        UtilsError::NoConvergence { iterations, .. } => IntegralError::NonConvergence {
            method: super::IntegrationMethod::Analytic,
            terms: iterations,
        },
        other => IntegralError::Numerical(other),
    })?;
    Ok(0.5 * PI.ln() - (l + 1.0) * 2.0_f64.ln() + l * q.ln() + ln_gamma(2.0 * l + 1.0)
        - ln_gamma(l + 1.5)
        - beta.ln() * (2.0 * l + 1.0)
        + hypergeometric.ln())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::math::spherical_bessel_j;
    use crate::utils::quadrature::integrate_adaptive;
    use approx::assert_relative_eq;

    /// Direct quadrature of Re/Im F_m for comparison
    fn moment_by_quadrature(m: u32, beta: Complex64, q: f64, multipole: u32) -> Complex64 {
        let integrand = |r: f64, imaginary: bool| {
            let phase = Complex64::new(-beta.re * r, -beta.im * r).exp();
            let value = r.powi(m as i32) * spherical_bessel_j(multipole as i32, q * r).unwrap();
            if imaginary {
                value * phase.im
            } else {
                value * phase.re
            }
        };
        let re = integrate_adaptive(&|r| integrand(r, false), 0.0, 80.0, 1e-14, 1e-12, 400).value;
        let im = integrate_adaptive(&|r| integrand(r, true), 0.0, 80.0, 1e-14, 1e-12, 400).value;
        Complex64::new(re, im)
    }

    #[test]
    fn test_moments_match_quadrature() {
        let beta = Complex64::new(2.0, 0.5);
        let q = 1.7;
        for multipole in 0..3 {
            let moments = Moments::new(beta, q, multipole, multipole, multipole + 8).unwrap();
            for order in multipole..=multipole + 8 {
                let expected = moment_by_quadrature(order, beta, q, multipole);
                let computed = moments.ln_moment(order).exp();
                assert_relative_eq!(computed.re, expected.re, epsilon = 1e-9, max_relative = 1e-8);
                assert_relative_eq!(computed.im, expected.im, epsilon = 1e-9, max_relative = 1e-8);
            }
        }
    }

    #[test]
    fn test_zeroth_moment_closed_form() {
        // F_0 for L = 0 is arctan(q/β)/q
        let beta = Complex64::new(1.3, 0.4);
        let q = 0.9;
        let moments = Moments::new(beta, q, 0, 0, 3).unwrap();
        let expected = (Complex64::new(q, 0.0) / beta).atan() / q;
        let computed = moments.ln_moment(0).exp();
        assert_relative_eq!(computed.re, expected.re, epsilon = 1e-12);
        assert_relative_eq!(computed.im, expected.im, epsilon = 1e-12);
    }

    #[test]
    fn test_high_orders_stay_finite() {
        let beta = Complex64::new(1.0, 3.0);
        let moments = Moments::new(beta, 4.0, 2, 3, 260).unwrap();
        for order in [3, 50, 150, 260] {
            let ln_value = moments.ln_moment(order);
            assert!(ln_value.re.is_finite(), "order {}", order);
        }
    }

    #[test]
    fn test_series_outcome_value() {
        assert_eq!(
            SeriesOutcome::Converged {
                value: 1.5,
                terms: 3
            }
            .value(),
            Some(1.5)
        );
        assert_eq!(SeriesOutcome::NotConverged { terms: 201 }.value(), None);
    }

    #[test]
    fn test_order_below_multipole_is_reported_unsupported() {
        use crate::atoms::Element;
        use crate::utils::PhysicalConstants;

        let hydrogen = Element::hydrogen_like(1)
            .unwrap()
            .with_constants(PhysicalConstants::atomic());
        let config = IntegrationConfig::atomic_units();
        // r R_f j_2 against a 1s orbital: moment order l' + n_j = 1 < L = 2
        let request = IntegralRequest::new(IntegralKind::Reduced, &hydrogen, 1, 0, 1.0, 0, 2, 3.0);
        match integrate(&request, &config) {
            Err(IntegralError::AnalyticUnavailable(message)) => {
                assert!(message.contains("not supported"), "{}", message);
                assert!(message.contains("order 1"), "{}", message);
            }
            other => panic!("expected an unsupported order, got {:?}", other),
        }
    }
}
