//! Validation helpers — reusable checks for shape parameters and inputs.
//!
//! Purpose
//! -------
//! Centralize the domain checks used by the validating entry points of the
//! distribution stack (`simulate`, `cdf`, `ppf`, option builders) so every
//! family rejects out-of-domain parameters with the same structured errors.
//!
//! Key behaviors
//! -------------
//! - Check parameter-vector lengths against the family's `num_params`.
//! - Check degrees of freedom (`> 2`), skewness (`-1 < lambda < 1`), and GED
//!   shape (`> 1`) including NaN and infinite values.
//! - Check quantile inputs lie in `[0, 1]`.
//! - Assert equal residual / variance lengths for log-likelihood evaluation.
//!
//! Conventions
//! -----------
//! - Comparisons are written so that NaN fails them (`!(x > 2.0)` rather
//!   than `x <= 2.0`).
//! - Functions return [`DistResult`] and never panic on invalid *values*;
//!   [`assert_same_length`] is the single exception because a length mismatch
//!   is a programming error at the call site.
use crate::volatility::errors::{DistError, DistResult};
use ndarray::ArrayView1;

/// Lower limit (exclusive) for degrees-of-freedom parameters.
pub const MIN_DEGREES_OF_FREEDOM: f64 = 2.0;

/// Lower limit (exclusive) for the GED shape accepted by `simulate`.
pub const MIN_GED_SHAPE: f64 = 1.0;

/// Validate that a parameter vector has the length the family expects.
///
/// # Errors
/// [`DistError::ParamLengthMismatch`] if `params.len() != expected`.
pub fn validate_param_length(params: &[f64], expected: usize) -> DistResult<()> {
    if params.len() != expected {
        return Err(DistError::ParamLengthMismatch { expected, actual: params.len() });
    }
    Ok(())
}

/// Validate a degrees-of-freedom parameter (Student's t `nu`, skew-t `eta`).
///
/// Parameters
/// ----------
/// - `value`: `f64`
///   Candidate degrees of freedom. Must be finite and strictly greater
///   than 2 so that the standardized distribution has finite variance.
///
/// Returns
/// -------
/// `DistResult<f64>`
///   - `Ok(value)` when admissible.
///   - `Err(DistError::InvalidDegreesOfFreedom)` otherwise, with a reason
///     distinguishing non-finite inputs from values ≤ 2.
///
/// Examples
/// --------
/// ```rust
/// # use rust_volatility::volatility::core::validation::validate_degrees_of_freedom;
/// assert!(validate_degrees_of_freedom(4.0).is_ok());
/// assert!(validate_degrees_of_freedom(2.0).is_err());
/// assert!(validate_degrees_of_freedom(f64::NAN).is_err());
/// ```
pub fn validate_degrees_of_freedom(value: f64) -> DistResult<f64> {
    if !value.is_finite() {
        return Err(DistError::InvalidDegreesOfFreedom {
            value,
            reason: "Degrees of freedom must be finite.",
        });
    }
    if !(value > MIN_DEGREES_OF_FREEDOM) {
        return Err(DistError::InvalidDegreesOfFreedom {
            value,
            reason: "Degrees of freedom must exceed 2 for a finite variance.",
        });
    }
    Ok(value)
}

/// Validate the skew-t asymmetry parameter `lambda ∈ (-1, 1)`.
///
/// NaN is reported as [`DistError::SkewnessTooLarge`].
///
/// # Errors
/// - [`DistError::SkewnessTooLarge`] if `lambda >= 1` or NaN.
/// - [`DistError::SkewnessTooSmall`] if `lambda <= -1`.
pub fn validate_skewness(value: f64) -> DistResult<f64> {
    if value <= -1.0 {
        return Err(DistError::SkewnessTooSmall { value });
    }
    if !(value < 1.0) {
        return Err(DistError::SkewnessTooLarge { value });
    }
    Ok(value)
}

/// Validate the GED shape `nu`, which must be finite and `> 1`.
///
/// # Errors
/// [`DistError::InvalidGedShape`] with a reason for non-finite or too-small
/// values.
pub fn validate_ged_shape(value: f64) -> DistResult<f64> {
    if !value.is_finite() {
        return Err(DistError::InvalidGedShape { value, reason: "GED shape must be finite." });
    }
    if !(value > MIN_GED_SHAPE) {
        return Err(DistError::InvalidGedShape {
            value,
            reason: "GED shape must exceed 1 for stable simulation.",
        });
    }
    Ok(value)
}

/// Validate a probability passed to a quantile function.
///
/// # Errors
/// [`DistError::InvalidProbability`] if `value` is NaN or outside `[0, 1]`.
pub fn validate_probability(index: usize, value: f64) -> DistResult<f64> {
    if !(0.0..=1.0).contains(&value) {
        return Err(DistError::InvalidProbability { index, value });
    }
    Ok(value)
}

/// Assert that residuals and conditional variances line up.
///
/// # Panics
/// Panics if `resids.len() != sigma2.len()`. A mismatch means the caller
/// paired series from different samples, which no return value can repair.
#[inline]
pub fn assert_same_length(resids: ArrayView1<'_, f64>, sigma2: ArrayView1<'_, f64>) {
    assert_eq!(
        resids.len(),
        sigma2.len(),
        "resids and sigma2 must have equal length ({} vs {})",
        resids.len(),
        sigma2.len()
    );
}
