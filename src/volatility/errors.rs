//! Errors for volatility innovation distributions (parameter domains,
//! configuration checks, and backend failures).
//!
//! This module defines [`DistError`] and the result alias [`DistResult`],
//! used by every validating entry point of the distribution stack. The type
//! implements `Display`/`Error` and, with the `python-bindings` feature,
//! converts to a Python `ValueError`.
//!
//! ## Conventions
//! - Indices are **0-based** (match Rust/NumPy).
//! - Only validating operations (`simulate`, `cdf`, `ppf`, option builders)
//!   return [`DistError`]. Log-likelihood evaluation, bounds, constraints, and
//!   starting values are total and never fail.
//! - Each out-of-domain shape parameter has its own variant so callers can
//!   tell which restriction was violated without parsing messages.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};
use statrs::distribution::StudentsTError;

/// Result alias for distribution operations that may produce [`DistError`].
pub type DistResult<T> = Result<T, DistError>;

/// Unified error type for innovation distributions.
#[derive(Debug, Clone, PartialEq)]
pub enum DistError {
    // ---- Parameter domains ----
    /// Degrees of freedom (Student's t `nu`, skew-t `eta`) must be finite and > 2.
    InvalidDegreesOfFreedom { value: f64, reason: &'static str },

    /// Skewness `lambda` must be strictly below 1.
    SkewnessTooLarge { value: f64 },

    /// Skewness `lambda` must be strictly above -1.
    SkewnessTooSmall { value: f64 },

    /// GED shape `nu` must be finite and > 1.
    InvalidGedShape { value: f64, reason: &'static str },

    /// Parameter vector has the wrong length for the chosen family.
    ParamLengthMismatch { expected: usize, actual: usize },

    /// A family identifier did not name a supported distribution.
    UnknownFamily { name: String },

    // ---- Inputs ----
    /// Quantile inputs must lie in [0, 1].
    InvalidProbability { index: usize, value: f64 },

    // ---- Configuration ----
    /// Box bounds must be finite with lower < upper and inside the family domain.
    InvalidBound { lower: f64, upper: f64, reason: &'static str },

    // ---- Backends ----
    /// A `statrs` constructor rejected its arguments.
    StatrsRejected { reason: String },

    /// A `rand_distr` sampler constructor rejected its arguments.
    SamplerRejected { reason: String },
}

impl std::error::Error for DistError {}

impl std::fmt::Display for DistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Parameter domains ----
            DistError::InvalidDegreesOfFreedom { value, reason } => {
                write!(f, "Degrees of freedom must be finite and > 2; got: {value}. {reason}")
            }
            DistError::SkewnessTooLarge { value } => {
                write!(f, "Skewness lambda must be < 1; got: {value}")
            }
            DistError::SkewnessTooSmall { value } => {
                write!(f, "Skewness lambda must be > -1; got: {value}")
            }
            DistError::InvalidGedShape { value, reason } => {
                write!(f, "GED shape nu must be finite and > 1; got: {value}. {reason}")
            }
            DistError::ParamLengthMismatch { expected, actual } => {
                write!(f, "Parameter vector length mismatch: expected {expected}, got {actual}")
            }
            DistError::UnknownFamily { name } => {
                write!(f, "Unknown innovation distribution: {name:?}")
            }
            // ---- Inputs ----
            DistError::InvalidProbability { index, value } => {
                write!(f, "Probability at index {index} must lie in [0, 1]; got: {value}")
            }
            // ---- Configuration ----
            DistError::InvalidBound { lower, upper, reason } => {
                write!(f, "Invalid parameter bound ({lower}, {upper}); {reason}")
            }
            // ---- Backends ----
            DistError::StatrsRejected { reason } => {
                write!(f, "statrs rejected distribution parameters: {reason}")
            }
            DistError::SamplerRejected { reason } => {
                write!(f, "Sampler construction failed: {reason}")
            }
        }
    }
}

impl From<StudentsTError> for DistError {
    fn from(err: StudentsTError) -> DistError {
        DistError::StatrsRejected { reason: err.to_string() }
    }
}

/// Convert a [`DistError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl From<DistError> for PyErr {
    fn from(err: DistError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
