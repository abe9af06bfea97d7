/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Special functions for radial integral calculations
//!
//! This module provides the special functions the integration methods are
//! built from: real and complex log-gamma, spherical Bessel functions of the
//! first and second kind, zeros of `j_l`, and the Gauss hypergeometric
//! function ₂F₁ for moderate parameters.

use super::errors::{Result, UtilsError};
use num_complex::Complex64;
use std::f64::consts::PI;

const LANCZOS_G: f64 = 7.0;

const LANCZOS_COEFFICIENTS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

/// Maximum number of terms summed by [`hyp2f1`] before giving up
const HYP2F1_MAX_TERMS: usize = 20_000;

/// Natural logarithm of |Γ(x)| for real x
///
/// Uses the Lanczos approximation (g = 7) with the reflection formula for
/// x < 1/2. Returns +∞ at the poles.
pub fn ln_gamma(x: f64) -> f64 {
    if x < 0.5 {
        let sin_pi_x = (PI * x).sin();
        if sin_pi_x == 0.0 {
            return f64::INFINITY;
        }
        return (PI / sin_pi_x.abs()).ln() - ln_gamma(1.0 - x);
    }

    let x = x - 1.0;
    let mut series = LANCZOS_COEFFICIENTS[0];
    for (i, &coefficient) in LANCZOS_COEFFICIENTS.iter().enumerate().skip(1) {
        series += coefficient / (x + i as f64);
    }
    let t = x + LANCZOS_G + 0.5;
    0.5 * (2.0 * PI).ln() + (x + 0.5) * t.ln() - t + series.ln()
}

/// Gamma function Γ(x) for real x
pub fn gamma(x: f64) -> f64 {
    if x < 0.5 {
        return PI / ((PI * x).sin() * gamma(1.0 - x));
    }
    ln_gamma(x).exp()
}

/// Reciprocal gamma function 1/Γ(x), exactly zero at the poles
pub fn reciprocal_gamma(x: f64) -> f64 {
    if x <= 0.0 && x.fract() == 0.0 {
        return 0.0;
    }
    1.0 / gamma(x)
}

/// Principal-branch-compatible complex log-gamma ln Γ(z)
///
/// The imaginary part is only defined modulo 2π, which is all that is needed
/// when the result is exponentiated.
pub fn ln_gamma_complex(z: Complex64) -> Complex64 {
    if z.re < 0.5 {
        // ln Γ(z) = ln π − ln sin(πz) − ln Γ(1 − z)
        let reflected = ln_gamma_complex(Complex64::new(1.0, 0.0) - z);
        return Complex64::new(PI.ln(), 0.0) - (z * PI).sin().ln() - reflected;
    }

    let z = z - 1.0;
    let mut series = Complex64::new(LANCZOS_COEFFICIENTS[0], 0.0);
    for (i, &coefficient) in LANCZOS_COEFFICIENTS.iter().enumerate().skip(1) {
        series += coefficient / (z + i as f64);
    }
    let t = z + LANCZOS_G + 0.5;
    0.5 * (2.0 * PI).ln() + (z + 0.5) * t.ln() - t + series.ln()
}

/// Spherical Bessel function of the first kind j_l(x)
///
/// # Arguments
///
/// * `l` - The order (l ≥ 0)
/// * `x` - The argument
///
/// # Returns
///
/// The value of j_l(x) or an error if the order is negative
pub fn spherical_bessel_j(l: i32, x: f64) -> Result<f64> {
    if l < 0 {
        return Err(UtilsError::InvalidArgument(format!(
            "Invalid order for spherical Bessel function: l={}",
            l
        )));
    }

    if x < 0.0 {
        let parity = if l % 2 == 0 { 1.0 } else { -1.0 };
        return Ok(parity * spherical_bessel_j(l, -x)?);
    }

    if x == 0.0 {
        return Ok(if l == 0 { 1.0 } else { 0.0 });
    }

    let value = if x < 1.0 || x * x < l as f64 + 1.5 {
        spherical_bessel_j_series(l, x)
    } else if x > l as f64 {
        spherical_bessel_j_upward(l, x)
    } else {
        spherical_bessel_j_miller(l, x)
    };

    Ok(value)
}

/// Power series j_l(x) = x^l/(2l+1)!! Σ (−x²/2)^k / (k! (2l+3)(2l+5)⋯(2l+2k+1))
fn spherical_bessel_j_series(l: i32, x: f64) -> f64 {
    let mut prefactor = 1.0;
    for i in 1..=l {
        prefactor *= x / (2 * i + 1) as f64;
    }

    let x2 = x * x;
    let mut term = 1.0;
    let mut sum = 1.0;
    for k in 1..200 {
        term *= -0.5 * x2 / (k as f64 * (2 * l + 2 * k + 1) as f64);
        sum += term;
        if term.abs() < 1e-17 * sum.abs() {
            break;
        }
    }

    prefactor * sum
}

/// Upward recurrence j_{n+1} = (2n+1)/x j_n − j_{n-1}, stable for x > l
fn spherical_bessel_j_upward(l: i32, x: f64) -> f64 {
    let (sin_x, cos_x) = x.sin_cos();
    let j0 = sin_x / x;
    if l == 0 {
        return j0;
    }

    let j1 = sin_x / (x * x) - cos_x / x;
    let mut j_prev = j0;
    let mut j_curr = j1;
    for n in 1..l {
        let j_next = (2 * n + 1) as f64 / x * j_curr - j_prev;
        j_prev = j_curr;
        j_curr = j_next;
    }

    j_curr
}

/// Miller's downward recurrence, normalised against j_0 or j_1
fn spherical_bessel_j_miller(l: i32, x: f64) -> f64 {
    let l = l as usize;
    let n_start = l + 50 + (40.0 * l as f64).sqrt() as usize;

    let mut j_above = 0.0;
    let mut j_curr = 1e-30;
    let mut j_l = 0.0;
    for n in (1..=n_start).rev() {
        let j_below = (2 * n + 1) as f64 / x * j_curr - j_above;
        j_above = j_curr;
        j_curr = j_below;
        if n - 1 == l {
            j_l = j_curr;
        }
        if j_curr.abs() > 1e250 {
            j_curr *= 1e-250;
            j_above *= 1e-250;
            j_l *= 1e-250;
        }
    }

    let (sin_x, cos_x) = x.sin_cos();
    let j0 = sin_x / x;
    let j1 = sin_x / (x * x) - cos_x / x;
    let scale = if j0.abs() >= j1.abs() {
        j0 / j_curr
    } else {
        j1 / j_above
    };

    j_l * scale
}

/// Spherical Bessel function of the second kind y_l(x)
///
/// # Arguments
///
/// * `l` - The order (l ≥ 0)
/// * `x` - The input value (x > 0)
///
/// # Returns
///
/// The value of y_l(x) or an error if parameters are invalid
pub fn spherical_bessel_y(l: i32, x: f64) -> Result<f64> {
    if l < 0 {
        return Err(UtilsError::InvalidArgument(format!(
            "Invalid order for spherical Bessel function: l={}",
            l
        )));
    }

    if x <= 0.0 {
        return Err(UtilsError::InvalidArgument(format!(
            "Input must be positive for spherical Bessel function of second kind: x={}",
            x
        )));
    }

    let (sin_x, cos_x) = x.sin_cos();
    let y0 = -cos_x / x;
    if l == 0 {
        return Ok(y0);
    }

    let y1 = -cos_x / (x * x) - sin_x / x;

    // Upward recurrence is stable for the second kind at every x
    let mut y_prev = y0;
    let mut y_curr = y1;
    for n in 1..l {
        let y_next = (2 * n + 1) as f64 / x * y_curr - y_prev;
        y_prev = y_curr;
        y_curr = y_next;
    }

    Ok(y_curr)
}

/// The first `count` positive zeros of j_l(x)
///
/// Zeros are bracketed by scanning in steps of π/8 (consecutive zeros of j_l
/// are at least π apart) and refined by bisection.
pub fn spherical_bessel_j_zeros(l: i32, count: usize) -> Result<Vec<f64>> {
    let step = PI / 8.0;
    let mut zeros = Vec::with_capacity(count);

    // j_l has no zeros below l + 1/2
    let mut x_lo = (l as f64).max(step);
    let mut f_lo = spherical_bessel_j(l, x_lo)?;

    while zeros.len() < count {
        let x_hi = x_lo + step;
        let f_hi = spherical_bessel_j(l, x_hi)?;

        if f_hi == 0.0 {
            zeros.push(x_hi);
        } else if f_lo.signum() != f_hi.signum() && f_lo != 0.0 {
            let (mut a, mut b, mut f_a) = (x_lo, x_hi, f_lo);
            for _ in 0..80 {
                let mid = 0.5 * (a + b);
                let f_mid = spherical_bessel_j(l, mid)?;
                if f_mid == 0.0 {
                    a = mid;
                    b = mid;
                    break;
                }
                if f_mid.signum() == f_a.signum() {
                    a = mid;
                    f_a = f_mid;
                } else {
                    b = mid;
                }
                if b - a <= 4.0 * f64::EPSILON * b {
                    break;
                }
            }
            zeros.push(0.5 * (a + b));
        }

        x_lo = x_hi;
        f_lo = f_hi;
    }

    Ok(zeros)
}

/// Gauss hypergeometric function ₂F₁(a, b; c; z) for real parameters
///
/// The defining series is summed on whichever of z, z/(z−1) (Pfaff) or 1/z
/// gives the smallest modulus. The 1/z connection formula is only used when
/// b − a is not an integer. Intended for moderate parameters; large |a|, |b|
/// suffer cancellation in the series.
pub fn hyp2f1(a: f64, b: f64, c: f64, z: Complex64) -> Result<Complex64> {
    if c <= 0.0 && c.fract() == 0.0 {
        return Err(UtilsError::InvalidArgument(format!(
            "2F1 is undefined for non-positive integer c={}",
            c
        )));
    }

    if z.norm() == 0.0 {
        return Ok(Complex64::new(1.0, 0.0));
    }

    let one = Complex64::new(1.0, 0.0);
    let direct = z.norm();
    let pfaff_argument = z / (z - one);
    let pfaff = pfaff_argument.norm();
    let inverse = if (b - a).fract() == 0.0 {
        f64::INFINITY
    } else {
        1.0 / direct
    };

    if direct <= pfaff && direct <= inverse {
        hyp2f1_series(a, b, c, z)
    } else if pfaff <= inverse {
        // F(a, b; c; z) = (1 − z)^{−a} F(a, c − b; c; z/(z − 1))
        Ok((one - z).powf(-a) * hyp2f1_series(a, c - b, c, pfaff_argument)?)
    } else {
        let minus_z = -z;
        let w = one / z;
        let first = gamma(c) * gamma(b - a) * reciprocal_gamma(b) * reciprocal_gamma(c - a);
        let second = gamma(c) * gamma(a - b) * reciprocal_gamma(a) * reciprocal_gamma(c - b);
        let f1 = hyp2f1_series(a, a - c + 1.0, a - b + 1.0, w)?;
        let f2 = hyp2f1_series(b, b - c + 1.0, b - a + 1.0, w)?;
        Ok(first * minus_z.powf(-a) * f1 + second * minus_z.powf(-b) * f2)
    }
}

/// Direct hypergeometric series, valid for |z| < 1
fn hyp2f1_series(a: f64, b: f64, c: f64, z: Complex64) -> Result<Complex64> {
    let mut term = Complex64::new(1.0, 0.0);
    let mut sum = term;

    for k in 0..HYP2F1_MAX_TERMS {
        let k = k as f64;
        term *= z * ((a + k) * (b + k) / ((c + k) * (k + 1.0)));
        sum += term;
        if term.norm() <= 1e-17 * sum.norm() {
            return Ok(sum);
        }
    }

    Err(UtilsError::NoConvergence {
        context: format!("2F1({}, {}; {}; {})", a, b, c, z),
        iterations: HYP2F1_MAX_TERMS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ln_gamma_integers_and_half_integers() {
        assert_relative_eq!(ln_gamma(5.0), 24.0_f64.ln(), epsilon = 1e-12);
        assert_relative_eq!(ln_gamma(1.0), 0.0, epsilon = 1e-13);
        assert_relative_eq!(gamma(0.5), PI.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(gamma(-0.5), -2.0 * PI.sqrt(), epsilon = 1e-11);
        assert_relative_eq!(ln_gamma(171.0), 706.573_062_245_787_4, max_relative = 1e-13);
    }

    #[test]
    fn test_complex_ln_gamma() {
        // Γ(1 + i) = 0.4980156681 − 0.1549498283 i
        let value = ln_gamma_complex(Complex64::new(1.0, 1.0)).exp();
        assert_relative_eq!(value.re, 0.498_015_668_1, epsilon = 1e-9);
        assert_relative_eq!(value.im, -0.154_949_828_3, epsilon = 1e-9);

        // Real axis must agree with the real implementation
        let real = ln_gamma_complex(Complex64::new(7.5, 0.0));
        assert_relative_eq!(real.re, ln_gamma(7.5), epsilon = 1e-12);
        assert!(real.im.abs() < 1e-12);
    }

    #[test]
    fn test_spherical_bessel_closed_forms() {
        let j2 = |x: f64| (3.0 / x.powi(3) - 1.0 / x) * x.sin() - 3.0 * x.cos() / (x * x);
        for &x in &[0.5, 1.7, 2.5, 10.0, 45.0] {
            assert_relative_eq!(spherical_bessel_j(2, x).unwrap(), j2(x), epsilon = 1e-10);
        }
        assert_relative_eq!(spherical_bessel_j(0, 0.0).unwrap(), 1.0);
        assert_eq!(spherical_bessel_j(3, 0.0).unwrap(), 0.0);
        assert!(spherical_bessel_j(-1, 1.0).is_err());
    }

    #[test]
    fn test_spherical_bessel_recurrence_across_branches() {
        // Mixes the series, Miller and upward branches
        for &x in &[0.3, 3.0, 7.2, 30.0] {
            for l in 1..12 {
                let lhs = spherical_bessel_j(l - 1, x).unwrap() + spherical_bessel_j(l + 1, x).unwrap();
                let rhs = (2 * l + 1) as f64 / x * spherical_bessel_j(l, x).unwrap();
                assert!((lhs - rhs).abs() <= 1e-10 * (1.0 + rhs.abs()), "l={} x={}", l, x);
            }
        }
    }

    #[test]
    fn test_spherical_bessel_y_closed_form() {
        let y1 = |x: f64| -x.cos() / (x * x) - x.sin() / x;
        assert_relative_eq!(spherical_bessel_y(1, 2.3).unwrap(), y1(2.3), epsilon = 1e-12);
        assert!(spherical_bessel_y(0, 0.0).is_err());
    }

    #[test]
    fn test_spherical_bessel_zeros() {
        let zeros = spherical_bessel_j_zeros(0, 5).unwrap();
        for (n, zero) in zeros.iter().enumerate() {
            assert_relative_eq!(*zero, (n + 1) as f64 * PI, epsilon = 1e-10);
        }

        let zeros = spherical_bessel_j_zeros(1, 2).unwrap();
        assert_relative_eq!(zeros[0], 4.493_409_457_909_064, epsilon = 1e-10);
        assert_relative_eq!(zeros[1], 7.725_251_836_937_707, epsilon = 1e-10);
    }

    #[test]
    fn test_hyp2f1_logarithm_identity() {
        // F(1, 1; 2; z) = −ln(1 − z)/z
        for &z in &[Complex64::new(0.3, 0.0), Complex64::new(-2.0, 0.0), Complex64::new(0.2, 0.6)] {
            let expected = -(Complex64::new(1.0, 0.0) - z).ln() / z;
            let value = hyp2f1(1.0, 1.0, 2.0, z).unwrap();
            assert_relative_eq!(value.re, expected.re, epsilon = 1e-12);
            assert_relative_eq!(value.im, expected.im, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_hyp2f1_arctangent_identity() {
        // F(1/2, 1; 3/2; −x²) = arctan(x)/x, exercising the 1/z connection formula
        for &x in &[Complex64::new(3.0, 0.0), Complex64::new(1.0, 0.5), Complex64::new(0.2, 0.1)] {
            let expected = x.atan() / x;
            let value = hyp2f1(0.5, 1.0, 1.5, -(x * x)).unwrap();
            assert_relative_eq!(value.re, expected.re, epsilon = 1e-12);
            assert_relative_eq!(value.im, expected.im, epsilon = 1e-12);
        }
    }
}
