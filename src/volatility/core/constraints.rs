//! Box bounds and linear constraints for shape parameters.
//!
//! Purpose
//! -------
//! Provide the two constraint representations an external optimizer consumes
//! when fitting distribution shape parameters: per-parameter box bounds
//! ([`ParamBound`]) and a linear inequality system `A · params ≥ b`
//! ([`LinearConstraints`]).
//!
//! Key behaviors
//! -------------
//! - Construct [`ParamBound`] values that enforce finiteness and
//!   `lower < upper`.
//! - Derive a [`LinearConstraints`] system from a slice of bounds, with one
//!   row for each lower bound and one row for each negated upper bound.
//!
//! Invariants & assumptions
//! ------------------------
//! - `LinearConstraints::a` has `2 × k` rows and `k` columns for `k` bounded
//!   parameters; `b` has `2 × k` entries. Zero parameters yield a `0 × 0`
//!   matrix and an empty vector.
//! - Row `2i` encodes `params[i] ≥ lower_i`; row `2i + 1` encodes
//!   `-params[i] ≥ -upper_i`.
//!
//! Conventions
//! -----------
//! - The optimizer treats bounds as closed; the family domains are open, so
//!   default bounds sit strictly inside each domain (see `options`).
use crate::volatility::errors::{DistError, DistResult};
use ndarray::{Array1, Array2};

/// ParamBound — closed box bound `[lower, upper]` for one shape parameter.
///
/// Invariants
/// ----------
/// - `lower` and `upper` are finite.
/// - `lower < upper`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamBound {
    /// Smallest admissible value.
    pub lower: f64,
    /// Largest admissible value (must be > `lower`).
    pub upper: f64,
}

impl ParamBound {
    /// Construct a validated bound.
    ///
    /// # Errors
    /// [`DistError::InvalidBound`] if either end is non-finite or
    /// `lower >= upper`.
    pub fn new(lower: f64, upper: f64) -> DistResult<Self> {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(DistError::InvalidBound {
                lower,
                upper,
                reason: "bounds must be finite.",
            });
        }
        if lower >= upper {
            return Err(DistError::InvalidBound {
                lower,
                upper,
                reason: "lower bound must be strictly below upper bound.",
            });
        }
        Ok(ParamBound { lower, upper })
    }

    /// Whether `value` lies inside the closed interval.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// Tuple view `(lower, upper)` for optimizers that take pairs.
    pub fn as_tuple(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }
}

/// LinearConstraints — inequality system `a · params ≥ b`.
///
/// Fields
/// ------
/// - `a`: `Array2<f64>` with shape `(n_rows, num_params)`.
/// - `b`: `Array1<f64>` with length `n_rows`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraints {
    pub a: Array2<f64>,
    pub b: Array1<f64>,
}

impl LinearConstraints {
    /// The constraint system for a family with no shape parameters.
    pub fn empty() -> Self {
        LinearConstraints { a: Array2::zeros((0, 0)), b: Array1::zeros(0) }
    }

    /// Build the two-rows-per-parameter system matching `bounds`.
    ///
    /// Parameters
    /// ----------
    /// - `bounds`: `&[ParamBound]`
    ///   One bound per parameter, in parameter order.
    ///
    /// Returns
    /// -------
    /// `LinearConstraints`
    ///   With `a[2i, i] = 1`, `b[2i] = lower_i`, `a[2i + 1, i] = -1`,
    ///   `b[2i + 1] = -upper_i`, all other entries of `a` zero.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rust_volatility::volatility::core::constraints::{LinearConstraints, ParamBound};
    /// let bounds = [ParamBound::new(2.05, 300.0).unwrap(), ParamBound::new(-0.99, 0.99).unwrap()];
    /// let cons = LinearConstraints::from_bounds(&bounds);
    /// assert_eq!(cons.a.dim(), (4, 2));
    /// assert_eq!(cons.b[1], -300.0);
    /// ```
    pub fn from_bounds(bounds: &[ParamBound]) -> Self {
        let k = bounds.len();
        if k == 0 {
            return Self::empty();
        }
        let mut a = Array2::zeros((2 * k, k));
        let mut b = Array1::zeros(2 * k);
        for (i, bound) in bounds.iter().enumerate() {
            a[[2 * i, i]] = 1.0;
            b[2 * i] = bound.lower;
            a[[2 * i + 1, i]] = -1.0;
            b[2 * i + 1] = -bound.upper;
        }
        LinearConstraints { a, b }
    }

    /// Number of inequality rows.
    pub fn n_rows(&self) -> usize {
        self.a.nrows()
    }

    /// Number of parameter columns.
    pub fn n_params(&self) -> usize {
        self.a.ncols()
    }

    /// Whether `params` satisfies every row of `a · params ≥ b`.
    ///
    /// # Panics
    /// Panics if `params.len()` differs from the number of columns.
    pub fn is_satisfied(&self, params: &[f64]) -> bool {
        assert_eq!(params.len(), self.n_params(), "parameter length must match constraint columns");
        let lhs = self.a.dot(&Array1::from(params.to_vec()));
        lhs.iter().zip(self.b.iter()).all(|(l, r)| l >= r)
    }
}
