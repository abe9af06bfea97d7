/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Numerical settings shared by the integration methods
//!
//! Defaults reproduce the reference tolerances used when the radial
//! integral tables were generated; changing them changes results.

use super::errors::{IntegralError, Result};
use crate::utils::constants::PhysicalConstants;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for every integration method and the arbiter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationConfig {
    /// Unit system (a0, keV)
    pub constants: PhysicalConstants,
    /// Relative size of the newest analytic term that counts as converged
    pub analytic_tolerance: f64,
    /// Largest analytic series index S
    pub analytic_max_terms: usize,
    /// Number of Hankel quadrature nodes
    pub hankel_nodes: usize,
    /// Hankel step-size parameter h
    pub hankel_step: f64,
    /// Relative tolerance of the accelerated oscillatory sum
    pub oscillatory_tolerance: f64,
    /// Half periods integrated before quadosc gives up refining
    pub oscillatory_max_half_periods: usize,
    /// Relative tolerance between tanh-sinh levels
    pub tanh_sinh_tolerance: f64,
    /// Deepest tanh-sinh refinement level
    pub tanh_sinh_max_level: usize,
    /// Upper limit of the fixed-range methods, in Bohr radii
    pub fixed_range_bohr: f64,
    /// Width of one stepwise window, in Bohr radii
    pub window_bohr: f64,
    /// Relative contribution below which a window counts as negligible
    pub stepwise_tolerance: f64,
    /// Windows always integrated before the convergence test may stop
    pub stepwise_min_windows: usize,
    /// Hard cap on stepwise windows
    pub stepwise_max_windows: usize,
    /// Per-window relative tolerance of numpy-stepwise
    pub window_relative_tolerance: f64,
    /// Absolute tolerance of the adaptive Gauss–Kronrod rule
    pub adaptive_abs_tolerance: f64,
    /// Relative tolerance of the adaptive Gauss–Kronrod rule
    pub adaptive_rel_tolerance: f64,
    /// Subinterval limit of the adaptive Gauss–Kronrod rule
    pub adaptive_max_subdivisions: usize,
    /// Relative tolerance for two methods to agree
    pub agreement_tolerance: f64,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            constants: PhysicalConstants::natural(),
            analytic_tolerance: 1e-20,
            analytic_max_terms: 200,
            hankel_nodes: 500,
            hankel_step: 0.001,
            oscillatory_tolerance: 1e-10,
            oscillatory_max_half_periods: 10_000,
            tanh_sinh_tolerance: 1e-12,
            tanh_sinh_max_level: 10,
            fixed_range_bohr: 100.0,
            window_bohr: 1.0,
            stepwise_tolerance: 1e-6,
            stepwise_min_windows: 0,
            stepwise_max_windows: 100_000,
            window_relative_tolerance: 1e-3,
            adaptive_abs_tolerance: 1.49e-8,
            adaptive_rel_tolerance: 1.49e-8,
            adaptive_max_subdivisions: 50,
            agreement_tolerance: 1e-2,
        }
    }
}

impl IntegrationConfig {
    /// Default settings in atomic units (a0 = 1)
    pub fn atomic_units() -> Self {
        Self {
            constants: PhysicalConstants::atomic(),
            ..Self::default()
        }
    }

    /// Read settings from a JSON file; missing fields take their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| IntegralError::Config(format!("{}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| IntegralError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every tolerance and length is usable
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("constants.bohr_radius", self.constants.bohr_radius),
            ("constants.kev", self.constants.kev),
            ("analytic_tolerance", self.analytic_tolerance),
            ("hankel_step", self.hankel_step),
            ("oscillatory_tolerance", self.oscillatory_tolerance),
            ("tanh_sinh_tolerance", self.tanh_sinh_tolerance),
            ("fixed_range_bohr", self.fixed_range_bohr),
            ("window_bohr", self.window_bohr),
            ("stepwise_tolerance", self.stepwise_tolerance),
            ("window_relative_tolerance", self.window_relative_tolerance),
            ("adaptive_rel_tolerance", self.adaptive_rel_tolerance),
            ("agreement_tolerance", self.agreement_tolerance),
        ];
        if let Some((name, value)) = positive
            .iter()
            .find(|(_, value)| !(value.is_finite() && *value > 0.0))
        {
            return Err(IntegralError::Config(format!(
                "{} must be positive, got {}",
                name, value
            )));
        }
        if !(self.adaptive_abs_tolerance >= 0.0) {
            return Err(IntegralError::Config(format!(
                "adaptive_abs_tolerance must be non-negative, got {}",
                self.adaptive_abs_tolerance
            )));
        }
        if self.hankel_nodes == 0 || self.adaptive_max_subdivisions == 0 {
            return Err(IntegralError::Config(
                "hankel_nodes and adaptive_max_subdivisions must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
