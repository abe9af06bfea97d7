/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Error types for the utils module

use thiserror::Error;

/// Errors that can occur in the utils module
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UtilsError {
    /// Invalid argument passed to a special function or quadrature rule
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Series or iterative scheme did not converge
    #[error("No convergence after {iterations} iterations: {context}")]
    NoConvergence {
        /// What was being evaluated
        context: String,
        /// Iterations performed before giving up
        iterations: usize,
    },
}

/// A specialized Result type for utils operations
pub type Result<T> = std::result::Result<T, UtilsError>;
