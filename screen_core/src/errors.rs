//! # Error Types
//!
//! Structured error types for screen_core. Input errors carry enough context
//! for a front end to build a message: every variant exposes a stable
//! message key plus positional arguments, so the localized text can live
//! outside the core.
//!
//! Internal consistency faults (a static table producing a plastic gap that
//! is out of tolerance) are not represented here. They panic.
//!
//! ## Example
//!
//! ```rust
//! use screen_core::errors::{CalcError, CalcResult};
//!
//! fn validate_depth(depth_mm: f64) -> CalcResult<()> {
//!     if depth_mm <= 0.0 {
//!         return Err(CalcError::InvalidDepth { depth_mm });
//!     }
//!     Ok(())
//! }
//!
//! let err = validate_depth(-5.0).unwrap_err();
//! assert_eq!(err.message_key(), "invalid_depth");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mathutils::format_general;

/// Result type alias for screen_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation and file operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// Channel depth is zero or negative
    #[error("Wrong channel depth value: {depth_mm} mm")]
    InvalidDepth { depth_mm: f64 },

    /// Plastic spacers only exist for a few nominal gaps
    #[error("Non-standard gap {gap_mm} mm for plastic spacers (valid: {} mm)", join_mm(.valid_gaps_mm))]
    NonStandardGap { gap_mm: f64, valid_gaps_mm: Vec<f64> },

    /// The discharge would end up too close to the channel top
    #[error("The channel is too deep: {depth_mm} mm (max. {max_depth_mm} mm)")]
    TooDeep { depth_mm: f64, max_depth_mm: f64 },

    /// No plastic plate thickness is catalogued for the available space
    #[error("No plastic plate fits a {space_mm} mm space between steel plates")]
    NoPlasticPlate { space_mm: u32 },

    /// An input value is invalid (out of range, unknown code, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Result file written by an incompatible version
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

fn join_mm(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format_general(*v))
        .collect::<Vec<_>>()
        .join(", ")
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidDepth { .. } => "INVALID_DEPTH",
            CalcError::NonStandardGap { .. } => "NON_STANDARD_GAP",
            CalcError::TooDeep { .. } => "TOO_DEEP",
            CalcError::NoPlasticPlate { .. } => "NO_PLASTIC_PLATE",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }

    /// Message catalog key used by front ends to look up localized text.
    pub fn message_key(&self) -> &'static str {
        match self {
            CalcError::InvalidDepth { .. } => "invalid_depth",
            CalcError::NonStandardGap { .. } => "non_standard_gap",
            CalcError::TooDeep { .. } => "too_deep",
            CalcError::NoPlasticPlate { .. } => "no_plastic_plate",
            CalcError::InvalidInput { .. } => "invalid_input",
            CalcError::FileError { .. } => "file_error",
            CalcError::SerializationError { .. } => "serialization_error",
            CalcError::VersionMismatch { .. } => "version_mismatch",
        }
    }

    /// Positional arguments for the message referenced by [`message_key`](Self::message_key).
    pub fn message_args(&self) -> Vec<String> {
        match self {
            CalcError::InvalidDepth { .. } => Vec::new(),
            CalcError::NonStandardGap { valid_gaps_mm, .. } => vec![join_mm(valid_gaps_mm)],
            CalcError::TooDeep { max_depth_mm, .. } => vec![format_general(*max_depth_mm)],
            CalcError::NoPlasticPlate { space_mm } => vec![space_mm.to_string()],
            CalcError::InvalidInput { field, value, reason } => {
                vec![field.clone(), value.clone(), reason.clone()]
            }
            CalcError::FileError { operation, path, reason } => {
                vec![operation.clone(), path.clone(), reason.clone()]
            }
            CalcError::SerializationError { reason } => vec![reason.clone()],
            CalcError::VersionMismatch {
                file_version,
                expected_version,
            } => vec![file_version.clone(), expected_version.clone()],
        }
    }
}

/// A failure entry as handed to message-catalog collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureMessage {
    /// Catalog key (e.g. "too_deep")
    pub key: String,
    /// Positional arguments, already formatted
    pub args: Vec<String>,
}

impl From<&CalcError> for FailureMessage {
    fn from(err: &CalcError) -> Self {
        FailureMessage {
            key: err.message_key().to_string(),
            args: err.message_args(),
        }
    }
}
