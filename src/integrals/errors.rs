/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Error types for the integrals module

use super::IntegrationMethod;
use crate::atoms::ElementError;
use crate::utils::errors::UtilsError;
use thiserror::Error;

/// Errors that can occur while evaluating radial integrals
#[derive(Error, Debug)]
pub enum IntegralError {
    /// Method name outside the known set
    #[error("Unknown integration method '{0}' (expected one of: quadosc, Hankel, analytic, tanh-sinh, tanh-sinh-stepwise, numpy, numpy-stepwise)")]
    UnknownMethod(String),

    /// Request rejected before any method ran
    #[error("Invalid integral request: {0}")]
    InvalidRequest(String),

    /// A series or stepwise scheme hit its iteration cap
    #[error("{method} did not converge after {terms} terms")]
    NonConvergence {
        /// Method that gave up
        method: IntegrationMethod,
        /// Terms or windows evaluated
        terms: usize,
    },

    /// The analytic method needs an STO expansion the model does not provide
    #[error("Analytic method unavailable: {0}")]
    AnalyticUnavailable(String),

    /// Arbitration ended without any validated result
    #[error("No integration method produced a corroborated result")]
    NoCorroboratedResult,

    /// Bound-state model error
    #[error("Element error: {0}")]
    Element(#[from] ElementError),

    /// Special function or quadrature error
    #[error("Numerical error: {0}")]
    Numerical(#[from] UtilsError),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl IntegralError {
    /// Whether the error means "this method has no reliable result" rather
    /// than a problem with the request itself
    pub fn is_missing_result(&self) -> bool {
        matches!(
            self,
            IntegralError::NonConvergence { .. }
                | IntegralError::AnalyticUnavailable(_)
                | IntegralError::Numerical(UtilsError::NoConvergence { .. })
        )
    }
}

/// Result type for integral operations
pub type Result<T> = std::result::Result<T, IntegralError>;
