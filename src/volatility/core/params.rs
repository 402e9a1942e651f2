//! Validated shape parameters for each innovation family.
//!
//! Raw parameter vectors (`&[f64]`) are what the optimizer works with. The
//! validating operations (`simulate`, `cdf`, `ppf`) first turn them into a
//! [`ShapeParams`] through [`Innovation::validate_params`], so downstream
//! numerical code can assume every field sits inside its domain.
//!
//! [`Innovation::validate_params`]: crate::volatility::core::family::Innovation::validate_params
use crate::volatility::core::family::Innovation;

/// Shape parameters that passed domain validation.
///
/// Invariants
/// ----------
/// - `StudentsT { nu }`: `nu` finite and `> 2`.
/// - `SkewStudent { eta, lambda }`: `eta` finite and `> 2`, `-1 < lambda < 1`.
/// - `GeneralizedError { nu }`: `nu` finite and `> 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeParams {
    Normal,
    StudentsT { nu: f64 },
    SkewStudent { eta: f64, lambda: f64 },
    GeneralizedError { nu: f64 },
}

impl ShapeParams {
    /// Family these parameters belong to.
    pub fn innovation(&self) -> Innovation {
        match self {
            ShapeParams::Normal => Innovation::Normal,
            ShapeParams::StudentsT { .. } => Innovation::StudentsT,
            ShapeParams::SkewStudent { .. } => Innovation::SkewStudent,
            ShapeParams::GeneralizedError { .. } => Innovation::GeneralizedError,
        }
    }

    /// Flatten back into the optimizer's parameter order.
    pub fn to_vec(&self) -> Vec<f64> {
        match *self {
            ShapeParams::Normal => Vec::new(),
            ShapeParams::StudentsT { nu } => vec![nu],
            ShapeParams::SkewStudent { eta, lambda } => vec![eta, lambda],
            ShapeParams::GeneralizedError { nu } => vec![nu],
        }
    }
}
