/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Numerical quadrature rules
//!
//! Four engines are provided, each used by one or more radial integral methods:
//!
//! - [`integrate_adaptive`]: globally adaptive 15-point Gauss–Kronrod (QUADPACK QAG style)
//! - [`integrate_tanh_sinh`]: double-exponential quadrature with level refinement
//! - [`integrate_oscillatory`]: half-period partial sums with Wynn ε acceleration
//! - [`HankelTransform`]: Ogata's (2005) quadrature for Hankel transforms of half-integer order

use super::errors::{Result, UtilsError};
use super::math::{spherical_bessel_j, spherical_bessel_j_zeros, spherical_bessel_y};
use std::f64::consts::PI;

/// Kronrod abscissae on [-1, 1], positive half, outermost first
const KRONROD_NODES: [f64; 8] = [
    0.991_455_371_120_812_6,
    0.949_107_912_342_758_5,
    0.864_864_423_359_769_1,
    0.741_531_185_599_394_4,
    0.586_087_235_467_691_1,
    0.405_845_151_377_397_2,
    0.207_784_955_007_898_5,
    0.0,
];

/// 15-point Kronrod weights matching [`KRONROD_NODES`]
const KRONROD_WEIGHTS: [f64; 8] = [
    0.022_935_322_010_529_22,
    0.063_092_092_629_978_55,
    0.104_790_010_322_250_2,
    0.140_653_259_715_525_9,
    0.169_004_726_639_267_9,
    0.190_350_578_064_785_4,
    0.204_432_940_075_298_9,
    0.209_482_141_084_727_8,
];

/// 7-point Gauss weights at the odd-indexed Kronrod nodes (and the centre)
const GAUSS_WEIGHTS: [f64; 4] = [
    0.129_484_966_168_869_7,
    0.279_705_391_489_276_7,
    0.381_830_050_505_118_9,
    0.417_959_183_673_469_4,
];

/// Half-width of the tanh-sinh parameter range; weights beyond it are below 1e-35
const TANH_SINH_T_MAX: f64 = 4.0;

/// Result of a quadrature evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureResult {
    /// Estimated integral
    pub value: f64,
    /// Estimated absolute error
    pub error: f64,
    /// Number of integrand evaluations
    pub evaluations: usize,
    /// Whether the requested tolerance was reached
    pub converged: bool,
}

/// Subinterval bookkeeping for the adaptive rule
#[derive(Debug, Clone, Copy)]
struct Segment {
    a: f64,
    b: f64,
    value: f64,
    error: f64,
}

/// Apply the 15-point Gauss–Kronrod rule on [a, b]
///
/// Returns the Kronrod estimate and QUADPACK's scaled error estimate.
fn gauss_kronrod_15<F: Fn(f64) -> f64>(f: &F, a: f64, b: f64) -> (f64, f64) {
    let center = 0.5 * (a + b);
    let half_length = 0.5 * (b - a);

    let f_center = f(center);
    let mut result_kronrod = KRONROD_WEIGHTS[7] * f_center;
    let mut result_gauss = GAUSS_WEIGHTS[3] * f_center;
    let mut result_abs = result_kronrod.abs();

    let mut f_left = [0.0; 7];
    let mut f_right = [0.0; 7];
    for j in 0..7 {
        let dx = half_length * KRONROD_NODES[j];
        let f1 = f(center - dx);
        let f2 = f(center + dx);
        f_left[j] = f1;
        f_right[j] = f2;
        result_kronrod += KRONROD_WEIGHTS[j] * (f1 + f2);
        result_abs += KRONROD_WEIGHTS[j] * (f1.abs() + f2.abs());
        if j % 2 == 1 {
            result_gauss += GAUSS_WEIGHTS[j / 2] * (f1 + f2);
        }
    }

    let mean = 0.5 * result_kronrod;
    let mut result_asc = KRONROD_WEIGHTS[7] * (f_center - mean).abs();
    for j in 0..7 {
        result_asc += KRONROD_WEIGHTS[j] * ((f_left[j] - mean).abs() + (f_right[j] - mean).abs());
    }

    let value = result_kronrod * half_length;
    let result_abs = result_abs * half_length.abs();
    let result_asc = result_asc * half_length.abs();
    let mut error = ((result_kronrod - result_gauss) * half_length).abs();

    if result_asc != 0.0 && error != 0.0 {
        error = result_asc * (200.0 * error / result_asc).powf(1.5).min(1.0);
    }
    if result_abs > f64::MIN_POSITIVE / (50.0 * f64::EPSILON) {
        error = error.max(50.0 * f64::EPSILON * result_abs);
    }

    (value, error)
}

/// Globally adaptive Gauss–Kronrod quadrature on a finite interval
///
/// The subinterval with the largest error estimate is bisected until the
/// summed error drops below `max(abs_tol, rel_tol·|I|)` or `max_subdivisions`
/// subintervals exist. The best estimate is returned in either case.
pub fn integrate_adaptive<F: Fn(f64) -> f64>(
    f: &F,
    a: f64,
    b: f64,
    abs_tol: f64,
    rel_tol: f64,
    max_subdivisions: usize,
) -> QuadratureResult {
    if a == b {
        return QuadratureResult {
            value: 0.0,
            error: 0.0,
            evaluations: 0,
            converged: true,
        };
    }

    let (value, error) = gauss_kronrod_15(f, a, b);
    let mut segments = vec![Segment { a, b, value, error }];
    let mut evaluations = 15;

    loop {
        let total: f64 = segments.iter().map(|s| s.value).sum();
        let total_error: f64 = segments.iter().map(|s| s.error).sum();

        if total_error <= abs_tol.max(rel_tol * total.abs()) {
            return QuadratureResult {
                value: total,
                error: total_error,
                evaluations,
                converged: true,
            };
        }

        if segments.len() >= max_subdivisions.max(1) {
            return QuadratureResult {
                value: total,
                error: total_error,
                evaluations,
                converged: false,
            };
        }

        let worst = segments
            .iter()
            .enumerate()
            .max_by(|(_, x), (_, y)| x.error.total_cmp(&y.error))
            .map(|(i, _)| i)
            .unwrap_or(0);
        let segment = segments.swap_remove(worst);
        let mid = 0.5 * (segment.a + segment.b);

        let (left_value, left_error) = gauss_kronrod_15(f, segment.a, mid);
        let (right_value, right_error) = gauss_kronrod_15(f, mid, segment.b);
        evaluations += 30;

        segments.push(Segment {
            a: segment.a,
            b: mid,
            value: left_value,
            error: left_error,
        });
        segments.push(Segment {
            a: mid,
            b: segment.b,
            value: right_value,
            error: right_error,
        });
    }
}

/// Tanh-sinh (double exponential) quadrature on a finite interval
///
/// Uses x = c + d·tanh(π/2·sinh t). The step in t is halved each level,
/// reusing previous nodes, until two successive estimates agree to
/// `tolerance` (relative) or `max_level` is reached.
pub fn integrate_tanh_sinh<F: Fn(f64) -> f64>(
    f: &F,
    a: f64,
    b: f64,
    tolerance: f64,
    max_level: usize,
) -> QuadratureResult {
    if a == b {
        return QuadratureResult {
            value: 0.0,
            error: 0.0,
            evaluations: 0,
            converged: true,
        };
    }

    let center = 0.5 * (a + b);
    let half_width = 0.5 * (b - a);

    // Contribution of the symmetric node pair at parameter t > 0
    let pair = |t: f64| -> f64 {
        let u = 0.5 * PI * t.sinh();
        let cosh_u = u.cosh();
        // 1 − tanh(u), computed without cancellation
        let gap = (-u).exp() / cosh_u;
        let weight = half_width * 0.5 * PI * t.cosh() / (cosh_u * cosh_u);
        if !weight.is_finite() || weight == 0.0 {
            return 0.0;
        }
        let offset = half_width * gap;
        let left = f(a + offset);
        let right = f(b - offset);
        let mut sum = 0.0;
        if left.is_finite() {
            sum += left;
        }
        if right.is_finite() {
            sum += right;
        }
        weight * sum
    };

    let center_weight = half_width * 0.5 * PI;
    let mut sum = center_weight * f(center);
    let mut evaluations = 1;

    // Level 0: h = 1
    let mut h = 1.0;
    let mut k = 1;
    while k as f64 * h <= TANH_SINH_T_MAX {
        sum += pair(k as f64 * h);
        evaluations += 2;
        k += 1;
    }
    let mut estimate = h * sum;
    let mut error = f64::INFINITY;

    for level in 1..=max_level {
        h *= 0.5;
        let mut k = 1;
        while k as f64 * h <= TANH_SINH_T_MAX {
            sum += pair(k as f64 * h);
            evaluations += 2;
            k += 2;
        }
        let refined = h * sum;
        error = (refined - estimate).abs();
        estimate = refined;

        if level >= 3 && error <= tolerance * estimate.abs() {
            return QuadratureResult {
                value: estimate,
                error,
                evaluations,
                converged: true,
            };
        }
    }

    QuadratureResult {
        value: estimate,
        error,
        evaluations,
        converged: false,
    }
}

/// Result of an oscillatory integral over [a, ∞)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OscillatoryResult {
    /// Computed value
    pub value: f64,
    /// Change of the accelerated estimate in the final step
    pub error: f64,
    /// Number of half periods integrated
    pub half_periods: usize,
    /// Whether the accelerated estimate settled within tolerance
    pub converged: bool,
}

/// Integrates an oscillatory function over [a, ∞) given its angular frequency
///
/// The range is cut at the expected zeros a + nπ/ω; every half period is
/// integrated with [`integrate_adaptive`] and the partial sums are
/// extrapolated with Wynn's ε algorithm.
pub fn integrate_oscillatory<F: Fn(f64) -> f64>(
    f: &F,
    a: f64,
    omega: f64,
    tolerance: f64,
    max_half_periods: usize,
) -> Result<OscillatoryResult> {
    if !(omega > 0.0) || !omega.is_finite() {
        return Err(UtilsError::InvalidArgument(format!(
            "Oscillation frequency must be positive, got {}",
            omega
        )));
    }

    let half_period = PI / omega;
    let mut partial_sums: Vec<f64> = Vec::new();
    let mut sum = 0.0;
    let mut previous_estimate = f64::NAN;
    let mut settled = 0;
    let mut error = f64::INFINITY;

    for n in 0..max_half_periods {
        let lower = a + n as f64 * half_period;
        let piece = integrate_adaptive(f, lower, lower + half_period, 0.0, 1e-12, 200);
        sum += piece.value;
        partial_sums.push(sum);

        // Wynn's table only needs the recent tail of the sequence
        let window_start = partial_sums.len().saturating_sub(30);
        let estimate = wynn_epsilon(&partial_sums[window_start..]);

        error = (estimate - previous_estimate).abs();
        if n >= 2 && (error <= tolerance * estimate.abs() || estimate == previous_estimate) {
            settled += 1;
        } else {
            settled = 0;
        }
        previous_estimate = estimate;

        if settled >= 2 {
            return Ok(OscillatoryResult {
                value: estimate,
                error,
                half_periods: n + 1,
                converged: true,
            });
        }
    }

    Ok(OscillatoryResult {
        value: previous_estimate,
        error,
        half_periods: max_half_periods,
        converged: false,
    })
}

/// Wynn's epsilon algorithm for convergence acceleration
///
/// Given partial sums S_0, S_1, ..., builds the ε table
/// ε_{k+1}(n) = ε_{k−1}(n+1) + 1/(ε_k(n+1) − ε_k(n)) and returns the last
/// entry of the deepest even column. Stops early once differences reach
/// round-off, since the sequence has then converged.
fn wynn_epsilon(partial_sums: &[f64]) -> f64 {
    let n = partial_sums.len();
    let Some(&last) = partial_sums.last() else {
        return 0.0;
    };
    if n < 3 {
        return last;
    }

    let mut eps_prev = vec![0.0; n];
    let mut eps_curr = partial_sums.to_vec();
    let mut best = last;

    for column in 1..n {
        let mut eps_next = Vec::with_capacity(eps_curr.len() - 1);
        for i in 0..eps_curr.len() - 1 {
            let diff = eps_curr[i + 1] - eps_curr[i];
            let scale = eps_curr[i + 1].abs().max(eps_curr[i].abs());
            if diff.abs() <= 4.0 * f64::EPSILON * scale {
                return best;
            }
            eps_next.push(eps_prev[i + 1] + 1.0 / diff);
        }

        eps_prev = eps_curr;
        eps_curr = eps_next;

        if column % 2 == 0 {
            if let Some(&value) = eps_curr.last() {
                if value.is_finite() {
                    best = value;
                }
            }
        }
    }

    best
}

/// Ogata's quadrature for Hankel transforms of order l + 1/2
///
/// Computes F(q) = ∫₀^∞ f(r) J_{l+1/2}(q r) r dr with the double-exponential
/// node mapping ψ(t) = t·tanh(π/2·sinh t) applied to the zeros of J_{l+1/2}.
/// Node count and step are fixed at construction; there is no refinement.
#[derive(Debug, Clone)]
pub struct HankelTransform {
    /// Order index l (the Bessel order is l + 1/2)
    l: i32,
    /// Mapped nodes x_k = π ψ(h ξ_k)/h
    nodes: Vec<f64>,
    /// Combined factors π w_k J_ν(x_k) ψ'(h ξ_k) x_k
    factors: Vec<f64>,
}

impl HankelTransform {
    /// Build the node table for order l + 1/2 with `n` nodes and step `h`
    pub fn new(l: i32, n: usize, h: f64) -> Result<Self> {
        if !(h > 0.0) || n == 0 {
            return Err(UtilsError::InvalidArgument(format!(
                "Hankel transform needs n > 0 and h > 0, got n={} h={}",
                n, h
            )));
        }

        let zeros = spherical_bessel_j_zeros(l, n)?;
        let mut nodes = Vec::with_capacity(n);
        let mut factors = Vec::with_capacity(n);

        for zero in zeros {
            // For half-integer order Y_ν/J_{ν+1} reduces to y_l/j_{l+1}
            let weight = spherical_bessel_y(l, zero)? / spherical_bessel_j(l + 1, zero)?;
            let t = h * zero / PI;
            let x = PI * psi(t) / h;
            let bessel = (2.0 * x / PI).sqrt() * spherical_bessel_j(l, x)?;
            nodes.push(x);
            factors.push(PI * weight * bessel * psi_derivative(t) * x);
        }

        Ok(Self { l, nodes, factors })
    }

    /// Order index l of the transform
    pub fn order(&self) -> i32 {
        self.l
    }

    /// Evaluate ∫₀^∞ f(r) J_{l+1/2}(q r) r dr
    pub fn transform<F: Fn(f64) -> f64>(&self, f: F, q: f64) -> f64 {
        let sum: f64 = self
            .nodes
            .iter()
            .zip(&self.factors)
            .map(|(&x, &factor)| {
                let value = f(x / q);
                if value.is_finite() {
                    factor * value
                } else {
                    0.0
                }
            })
            .sum();
        sum / (q * q)
    }
}

/// Ogata's node mapping ψ(t) = t tanh(π/2 sinh t)
fn psi(t: f64) -> f64 {
    t * (0.5 * PI * t.sinh()).tanh()
}

/// Derivative ψ'(t) = (π t cosh t + sinh(π sinh t)) / (1 + cosh(π sinh t))
fn psi_derivative(t: f64) -> f64 {
    let s = PI * t.sinh();
    if s > 700.0 {
        return 1.0;
    }
    (PI * t * t.cosh() + s.sinh()) / (1.0 + s.cosh())
}
