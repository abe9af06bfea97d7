/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Regular Coulomb wave functions F_l(η, ρ)
//!
//! F solves u'' + (1 − 2η/ρ − l(l+1)/ρ²) u = 0 with u ~ C_l(η) ρ^{l+1} at the
//! origin. Three regimes are stitched together:
//!
//! - ρ ≤ min([`SERIES_RADIUS`], 10/|η|): the power series about the origin
//! - intermediate ρ: Taylor continuation of the ODE from the series boundary
//! - ρ ≥ max(25, 2((l+1)² + η²)): the asymptotic expansion of H⁺ = G + iF

use crate::utils::errors::{Result, UtilsError};
use crate::utils::math::{ln_gamma, ln_gamma_complex};
use num_complex::Complex64;
use std::f64::consts::PI;

/// Largest ρ evaluated directly by the origin power series
pub const SERIES_RADIUS: f64 = 4.0;

/// Bound on |η|ρ for the origin series
///
/// For attractive charges the series alternates and its terms grow like
/// e^{2√(2|η|ρ)} before cancelling, so the series radius shrinks as 1/|η|.
const SERIES_CANCELLATION: f64 = 10.0;

/// Largest Taylor step of the ODE continuation
const MAX_TAYLOR_STEP: f64 = 2.0;

/// Term cap shared by every series in this module
const MAX_TERMS: usize = 500;

/// Relative size below which a series term is negligible
const TERM_TOLERANCE: f64 = 1e-17;

/// Value and ρ-derivative of F_l(η, ρ)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoulombWave {
    /// F_l(η, ρ)
    pub value: f64,
    /// dF_l/dρ
    pub derivative: f64,
}

/// ln C_l(η) with C_l(η) = 2^l e^{−πη/2} |Γ(l+1+iη)| / (2l+1)!
pub fn ln_normalization(l: u32, eta: f64) -> f64 {
    let l = l as f64;
    l * 2.0_f64.ln() - 0.5 * PI * eta + ln_gamma_complex(Complex64::new(l + 1.0, eta)).re
        - ln_gamma(2.0 * l + 2.0)
}

/// Regular Coulomb function and its derivative
pub fn regular_coulomb(l: u32, eta: f64, rho: f64) -> Result<CoulombWave> {
    if !(rho >= 0.0) || !rho.is_finite() || !eta.is_finite() {
        return Err(UtilsError::InvalidArgument(format!(
            "Coulomb function needs finite ρ ≥ 0 and η, got ρ={} η={}",
            rho, eta
        )));
    }

    let radius = series_radius(eta);
    if rho <= radius {
        return origin_series(l, eta, rho);
    }

    if rho >= asymptotic_radius(l, eta) {
        if let Some(wave) = asymptotic(l, eta, rho) {
            return Ok(wave);
        }
    }

    let start = origin_series(l, eta, radius)?;
    continue_ode(l, eta, radius, start, rho)
}

/// Largest ρ at which the origin series keeps full precision
pub fn series_radius(eta: f64) -> f64 {
    SERIES_RADIUS.min(SERIES_CANCELLATION / eta.abs())
}

/// F_l(η, ρ)/ρ, finite at the origin
pub fn reduced_coulomb(l: u32, eta: f64, rho: f64) -> Result<f64> {
    if rho <= series_radius(eta) && rho >= 0.0 {
        let (sum, _) = series_sums(l, eta, rho)?;
        return Ok(ln_normalization(l, eta).exp() * rho.powi(l as i32) * sum);
    }
    Ok(regular_coulomb(l, eta, rho)?.value / rho)
}

/// F_l(η, ρ)/ρ from the Kummer representation
///
/// Uses F = C ρ^{l+1} Re[e^{−iρ} M(l+1−iη, 2l+2, 2iρ)] inside
/// [`series_radius`] and [`reduced_coulomb`] beyond it.
pub fn reduced_coulomb_kummer(l: u32, eta: f64, rho: f64) -> Result<f64> {
    if !(rho >= 0.0) || rho > series_radius(eta) {
        return reduced_coulomb(l, eta, rho);
    }

    let a = Complex64::new(l as f64 + 1.0, -eta);
    let b = 2.0 * l as f64 + 2.0;
    let z = Complex64::new(0.0, 2.0 * rho);

    let mut term = Complex64::new(1.0, 0.0);
    let mut sum = term;
    let mut small_terms = 0;
    for s in 0..MAX_TERMS {
        let s = s as f64;
        term *= (a + s) * z / ((b + s) * (s + 1.0));
        sum += term;
        if term.norm() <= TERM_TOLERANCE * sum.norm() {
            small_terms += 1;
            if small_terms >= 2 {
                let phase = Complex64::new(0.0, -rho).exp();
                return Ok(ln_normalization(l, eta).exp()
                    * rho.powi(l as i32)
                    * (phase * sum).re);
            }
        } else {
            small_terms = 0;
        }
    }

    Err(UtilsError::NoConvergence {
        context: format!("Kummer series for l={} η={} ρ={}", l, eta, rho),
        iterations: MAX_TERMS,
    })
}

/// Sums S = Σ B_j ρ^j and S' = Σ (j+l+1) B_j ρ^j of the origin series
///
/// B_0 = 1, B_1 = η/(l+1), j(j+2l+1) B_j = 2η B_{j−1} − B_{j−2}.
fn series_sums(l: u32, eta: f64, rho: f64) -> Result<(f64, f64)> {
    let l = l as f64;
    let mut b_prev2 = 0.0;
    let mut b_prev = 1.0;
    let mut power = 1.0;
    let mut sum = 1.0;
    let mut derivative_sum = l + 1.0;
    let mut small_terms = 0;

    for j in 1..MAX_TERMS {
        let jf = j as f64;
        let b = (2.0 * eta * b_prev - b_prev2) / (jf * (jf + 2.0 * l + 1.0));
        power *= rho;
        let term = b * power;
        sum += term;
        derivative_sum += (jf + l + 1.0) * term;

        if term.abs() <= TERM_TOLERANCE * sum.abs() {
            small_terms += 1;
            if small_terms >= 2 {
                return Ok((sum, derivative_sum));
            }
        } else {
            small_terms = 0;
        }
        b_prev2 = b_prev;
        b_prev = b;
    }

    Err(UtilsError::NoConvergence {
        context: format!("Coulomb origin series for l={} η={} ρ={}", l, eta, rho),
        iterations: MAX_TERMS,
    })
}

fn origin_series(l: u32, eta: f64, rho: f64) -> Result<CoulombWave> {
    let (sum, derivative_sum) = series_sums(l, eta, rho)?;
    let c = ln_normalization(l, eta).exp();
    let rho_l = rho.powi(l as i32);
    Ok(CoulombWave {
        value: c * rho_l * rho * sum,
        derivative: c * rho_l * derivative_sum,
    })
}

fn asymptotic_radius(l: u32, eta: f64) -> f64 {
    let l1 = l as f64 + 1.0;
    25.0_f64.max(2.0 * (l1 * l1 + eta * eta))
}

/// Asymptotic expansion H⁺ ~ e^{iθ} Σ (a)_k (b)_k / (k! (2iρ)^k)
///
/// a = 1+l+iη, b = −l+iη, θ = ρ − η ln 2ρ − lπ/2 + arg Γ(l+1+iη).
/// Returns `None` if the series starts diverging before reaching round-off.
fn asymptotic(l: u32, eta: f64, rho: f64) -> Option<CoulombWave> {
    let lf = l as f64;
    let a = Complex64::new(1.0 + lf, eta);
    let b = Complex64::new(-lf, eta);
    let z = Complex64::new(0.0, 2.0 * rho);

    let mut term = Complex64::new(1.0, 0.0);
    let mut sum = term;
    let mut weighted = Complex64::new(0.0, 0.0);
    let mut previous_norm = f64::INFINITY;

    for k in 0..MAX_TERMS {
        let kf = k as f64;
        term *= (a + kf) * (b + kf) / ((kf + 1.0) * z);
        let norm = term.norm();
        if norm > previous_norm {
            return None;
        }
        sum += term;
        weighted += term * (kf + 1.0);
        previous_norm = norm;

        if norm <= TERM_TOLERANCE * sum.norm() {
            let sigma = ln_gamma_complex(Complex64::new(lf + 1.0, eta)).im;
            let theta = rho - eta * (2.0 * rho).ln() - 0.5 * lf * PI + sigma;
            let phase = Complex64::new(0.0, theta).exp();
            let h_plus = phase * sum;
            let h_plus_derivative = phase
                * (Complex64::new(0.0, 1.0 - eta / rho) * sum - weighted / rho);
            return Some(CoulombWave {
                value: h_plus.im,
                derivative: h_plus_derivative.im,
            });
        }
    }

    None
}

/// March (F, F') from `rho_start` to `rho_end` with Taylor steps of the ODE
///
/// Steps stay below half the distance to the singular point at ρ = 0 and
/// below two local wavelengths 1/κ, κ² = |1 − 2η/ρ − l(l+1)/ρ²|.
fn continue_ode(
    l: u32,
    eta: f64,
    rho_start: f64,
    start: CoulombWave,
    rho_end: f64,
) -> Result<CoulombWave> {
    let centrifugal = (l * (l + 1)) as f64;
    let mut rho = rho_start;
    let mut wave = start;

    while rho < rho_end {
        let kappa = (1.0 - 2.0 * eta / rho - centrifugal / (rho * rho)).abs().sqrt();
        let mut h = (rho_end - rho).min(MAX_TAYLOR_STEP).min(0.5 * rho);
        if kappa > 0.0 {
            h = h.min(2.0 / kappa);
        }
        wave = taylor_step(centrifugal, eta, rho, wave, h)?;
        rho += h;
    }

    Ok(wave)
}

/// One Taylor step of ρ² u'' = (l(l+1) + 2ηρ − ρ²) u about ρ0
///
/// With u = Σ c_m x^m, x = ρ − ρ0:
/// ρ0²(m+2)(m+1)c_{m+2} = K0 c_m + K1 c_{m−1} − c_{m−2} − 2ρ0(m+1)m c_{m+1} − m(m−1)c_m
fn taylor_step(centrifugal: f64, eta: f64, rho0: f64, wave: CoulombWave, h: f64) -> Result<CoulombWave> {
    let k0 = centrifugal + 2.0 * eta * rho0 - rho0 * rho0;
    let k1 = 2.0 * eta - 2.0 * rho0;
    let rho0_sq = rho0 * rho0;

    // c_{m-2}, c_{m-1}, c_m, c_{m+1}
    let mut c_m2 = 0.0;
    let mut c_m1 = 0.0;
    let mut c_m = wave.value;
    let mut c_p1 = wave.derivative;

    let mut value = c_m + c_p1 * h;
    let mut derivative = c_p1;
    let mut h_power = h; // h^{m+1}
    let mut small_terms = 0;

    for m in 0..MAX_TERMS {
        let mf = m as f64;
        let c_p2 = (k0 * c_m + k1 * c_m1 - c_m2
            - 2.0 * rho0 * (mf + 1.0) * mf * c_p1
            - mf * (mf - 1.0) * c_m)
            / (rho0_sq * (mf + 2.0) * (mf + 1.0));

        let derivative_term = (mf + 2.0) * c_p2 * h_power;
        h_power *= h;
        let value_term = c_p2 * h_power;
        value += value_term;
        derivative += derivative_term;

        let scale = value.abs() + derivative.abs();
        if value_term.abs() <= TERM_TOLERANCE * scale
            && derivative_term.abs() <= TERM_TOLERANCE * scale
        {
            small_terms += 1;
            if small_terms >= 3 {
                return Ok(CoulombWave { value, derivative });
            }
        } else {
            small_terms = 0;
        }

        c_m2 = c_m1;
        c_m1 = c_m;
        c_m = c_p1;
        c_p1 = c_p2;
    }

    Err(UtilsError::NoConvergence {
        context: format!("Coulomb ODE Taylor step at ρ={} h={}", rho0, h),
        iterations: MAX_TERMS,
    })
}
