//! Error types for the settlement engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading statute tables,
//! ingesting employee rows, or computing a settlement.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the settlement engine.
///
/// # Example
///
/// ```
/// use finiquito_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/isr.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/isr.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or failed validation.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A caller-supplied amount was outside the range the engine accepts.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The input that was rejected.
        field: String,
        /// A description of what made the input invalid.
        message: String,
    },

    /// Positive taxable income fell outside every ISR bracket.
    #[error("No ISR bracket covers monthly taxable income {income}")]
    BracketNotFound {
        /// The monthly taxable income that was looked up.
        income: Decimal,
    },

    /// An ingestion batch produced no usable employee records.
    #[error("No valid employee records found in input")]
    NoValidRecords,

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
