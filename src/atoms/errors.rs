/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Error types for the atoms module

/// Error types for the atoms module
#[derive(Debug, thiserror::Error)]
pub enum ElementError {
    #[error("Shell n={n}, l={l} is not occupied in {element}")]
    InvalidShell { element: String, n: u32, l: u32 },

    #[error("Invalid orbital table: {0}")]
    InvalidTable(String),

    #[error("File error: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Result type for element operations
pub type Result<T> = std::result::Result<T, ElementError>;
