/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Window-by-window integration with a running convergence test
//!
//! Windows [i·w, (i+1)·w] are integrated until the latest two windows each
//! contributed less than `tolerance` relative to the running total. Two
//! consecutive small windows can also coincide with a near-zero crossing of
//! an oscillating integrand; `min_windows` guards against stopping there.

use super::errors::{IntegralError, Result};
use super::IntegrationMethod;
use log::trace;

/// Settings of one stepwise run
#[derive(Debug, Clone, Copy)]
pub(crate) struct StepwiseSettings {
    pub method: IntegrationMethod,
    pub window: f64,
    pub tolerance: f64,
    pub min_windows: usize,
    pub max_windows: usize,
}

/// Sum window integrals until two consecutive windows are negligible
pub(crate) fn sum_windows<F>(settings: &StepwiseSettings, mut integrate_window: F) -> Result<(f64, usize)>
where
    F: FnMut(f64, f64) -> f64,
{
    let mut total = 0.0;
    let mut latest = 1.0_f64;
    let mut previous;
    let mut windows = 0;

    loop {
        previous = latest;
        let lower = windows as f64 * settings.window;
        let contribution = integrate_window(lower, lower + settings.window);
        total += contribution;
        latest = contribution.abs() / total.abs();
        windows += 1;

        trace!(
            "{} window {}: contribution {:e}, total {:e}",
            settings.method,
            windows,
            contribution,
            total
        );

        // NaN ratios compare false and end the loop, leaving a NaN total
        let settled = !(latest > settings.tolerance || previous > settings.tolerance);
        if settled && windows >= settings.min_windows {
            return Ok((total, windows));
        }
        if windows >= settings.max_windows {
            return Err(IntegralError::NonConvergence {
                method: settings.method,
                terms: windows,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(min_windows: usize) -> StepwiseSettings {
        StepwiseSettings {
            method: IntegrationMethod::NumpyStepwise,
            window: 1.0,
            tolerance: 1e-6,
            min_windows,
            max_windows: 1000,
        }
    }

    #[test]
    fn test_stops_after_two_negligible_windows() {
        // ∫ e^{-x} over unit windows
        let (total, windows) = sum_windows(&settings(0), |a, b| (-a).exp() - (-b).exp()).unwrap();
        assert!((total - 1.0).abs() < 1e-5);
        assert!(windows > 10 && windows < 20);
    }

    #[test]
    fn test_min_windows_floor() {
        let mut calls = 0;
        let (total, windows) = sum_windows(&settings(8), |a, _| {
            calls += 1;
            if a == 0.0 {
                1.0
            } else {
                0.0
            }
        })
        .unwrap();
        assert_eq!(total, 1.0);
        assert_eq!(windows, 8);
        assert_eq!(calls, 8);
    }

    #[test]
    fn test_window_cap_reports_non_convergence() {
        let result = sum_windows(&settings(0), |_, _| 1.0);
        assert!(matches!(
            result,
            Err(IntegralError::NonConvergence { terms: 1000, .. })
        ));
    }

    #[test]
    fn test_nan_total_ends_loop() {
        let (total, windows) = sum_windows(&settings(0), |_, _| f64::NAN).unwrap();
        assert!(total.is_nan());
        assert_eq!(windows, 2);
    }
}
