/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Method evaluation and arbitration
//!
//! No method is reliable over the whole (n, l, k, q) space, so the arbiter
//! runs a short hierarchy of methods, keeps the results that agree with at
//! least one other result, and returns the fastest of those. quadosc is the
//! trusted last resort when nothing else corroborates.

use super::config::IntegrationConfig;
use super::errors::{IntegralError, Result};
use super::{radial_integral_with_config, IntegralRequest, IntegrationMethod};
use log::{debug, log, Level};
use std::time::{Duration, Instant};

/// Methods tried by the arbiter, in order
pub const METHOD_HIERARCHY: [IntegrationMethod; 3] = [
    IntegrationMethod::Analytic,
    IntegrationMethod::NumpyStepwise,
    IntegrationMethod::Quadosc,
];

/// A finite result of one method
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MethodResult {
    /// Method that produced the value
    pub method: IntegrationMethod,
    /// Integral value
    pub value: f64,
    /// Wall-clock time of the evaluation
    pub duration: Duration,
}

/// Everything the arbiter saw and decided
#[derive(Debug, Clone, PartialEq)]
pub struct MethodEvaluation {
    /// Finite results in the order they were computed
    pub results: Vec<MethodResult>,
    /// Validated results, fastest first
    pub working: Vec<MethodResult>,
    /// The chosen result
    pub best: MethodResult,
}

/// Outcome of one method in a side-by-side comparison
#[derive(Debug)]
pub struct MethodComparison {
    /// Method that was run
    pub method: IntegrationMethod,
    /// Its value or the reason it has none
    pub outcome: Result<f64>,
    /// Wall-clock time of the evaluation
    pub duration: Duration,
}

/// Run several methods on one request and time each of them
pub fn compare_methods(
    request: &IntegralRequest<'_>,
    methods: &[IntegrationMethod],
    config: &IntegrationConfig,
) -> Vec<MethodComparison> {
    methods
        .iter()
        .map(|&method| {
            let start = Instant::now();
            let outcome = radial_integral_with_config(request, method, config);
            MethodComparison {
                method,
                outcome,
                duration: start.elapsed(),
            }
        })
        .collect()
}

/// Name the fastest validated method for a request (default configuration)
pub fn evaluate_integration_methods(
    request: &IntegralRequest<'_>,
    verbose: bool,
) -> Result<IntegrationMethod> {
    evaluate_integration_methods_with_config(request, verbose, &IntegrationConfig::default())
}

/// Name the fastest validated method for a request
pub fn evaluate_integration_methods_with_config(
    request: &IntegralRequest<'_>,
    verbose: bool,
    config: &IntegrationConfig,
) -> Result<IntegrationMethod> {
    Ok(evaluation_report(request, verbose, config)?.best.method)
}

/// Run the arbiter and return its full report
pub fn evaluation_report(
    request: &IntegralRequest<'_>,
    verbose: bool,
    config: &IntegrationConfig,
) -> Result<MethodEvaluation> {
    request.validate(config)?;
    arbitrate(
        |method| {
            let start = Instant::now();
            let value = radial_integral_with_config(request, method, config)?;
            Ok((value, start.elapsed()))
        },
        config.agreement_tolerance,
        verbose,
    )
}

/// Arbitration over an arbitrary evaluator
///
/// `evaluate` returns a value and its duration. Errors meaning "no result"
/// and non-finite values are skipped; any other error aborts.
pub(crate) fn arbitrate<F>(mut evaluate: F, tolerance: f64, verbose: bool) -> Result<MethodEvaluation>
where
    F: FnMut(IntegrationMethod) -> Result<(f64, Duration)>,
{
    let level = if verbose { Level::Info } else { Level::Debug };

    log!(level, "Initial integration results:");
    let mut results = Vec::new();
    for method in METHOD_HIERARCHY {
        if let Some(result) = run(&mut evaluate, method, level)? {
            results.push(result);
            if method == IntegrationMethod::NumpyStepwise {
                break;
            }
        }
    }

    let mut working = agreeing(&results, tolerance);
    log!(level, "Duplicates:");
    log_results(level, &working);

    if working.is_empty() {
        if let Some(quadosc) = results
            .iter()
            .find(|r| r.method == IntegrationMethod::Quadosc)
        {
            working.push(*quadosc);
        } else {
            if let Some(quadosc) = run(&mut evaluate, IntegrationMethod::Quadosc, level)? {
                results.push(quadosc);
            }
            working = agreeing(&results, tolerance);
            if working.is_empty() {
                if let Some(fallback) = results
                    .iter()
                    .find(|r| r.method == IntegrationMethod::NumpyStepwise)
                {
                    debug!("No agreement after quadosc, falling back to numpy-stepwise");
                    working.push(*fallback);
                }
            }
        }
    }

    working.sort_by_key(|r| r.duration);
    log!(level, "Working methods:");
    log_results(level, &working);

    let best = *working.first().ok_or(IntegralError::NoCorroboratedResult)?;
    log!(level, "Best method: {}", best.method);

    Ok(MethodEvaluation {
        results,
        working,
        best,
    })
}

/// Run one method, turning missing or non-finite results into `None`
fn run<F>(evaluate: &mut F, method: IntegrationMethod, level: Level) -> Result<Option<MethodResult>>
where
    F: FnMut(IntegrationMethod) -> Result<(f64, Duration)>,
{
    match evaluate(method) {
        Ok((value, duration)) if value.is_finite() => {
            log!(level, "{}\t{:e}\t{:?}", method, value, duration);
            Ok(Some(MethodResult {
                method,
                value,
                duration,
            }))
        }
        Ok((value, _)) => {
            debug!("{} returned non-finite value {}", method, value);
            Ok(None)
        }
        Err(err) if err.is_missing_result() => {
            debug!("{} skipped: {}", method, err);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Results that agree with at least one other result
fn agreeing(results: &[MethodResult], tolerance: f64) -> Vec<MethodResult> {
    results
        .iter()
        .enumerate()
        .filter(|(i, result)| {
            results
                .iter()
                .enumerate()
                .any(|(j, other)| *i != j && is_close(result.value, other.value, tolerance))
        })
        .map(|(_, result)| *result)
        .collect()
}

/// |a − b| ≤ tolerance · max(|a|, |b|)
fn is_close(a: f64, b: f64, tolerance: f64) -> bool {
    a == b || (a - b).abs() <= tolerance * a.abs().max(b.abs())
}

fn log_results(level: Level, results: &[MethodResult]) {
    if results.is_empty() {
        log!(level, "None.");
    }
    for result in results {
        log!(
            level,
            "{}\t{:e}\t{:?}",
            result.method,
            result.value,
            result.duration
        );
    }
}
