//! Innovation families — the tagged set of supported distributions and the
//! uniform contract each one fulfils.
//!
//! Purpose
//! -------
//! Name the four supported innovation distributions with a single `Copy`
//! tag, [`Innovation`], and dispatch every stateless operation of the
//! distribution contract (log-likelihood, bounds, constraints, starting
//! values, CDF, quantile) to the per-family kernels in
//! [`crate::volatility::models`].
//!
//! Key behaviors
//! -------------
//! - `loglikelihood_individual` builds the family kernel once per call, with
//!   its log-normalizing constants precomputed, and evaluates it elementwise.
//! - `bounds` / `constraints` are read from a [`BoundsConfig`]; they do not
//!   depend on the residual values.
//! - `validate_params` is the single gate between raw optimizer vectors and
//!   typed [`ShapeParams`]; `cdf`, `ppf` and sampling go through it.
//!
//! Invariants & assumptions
//! ------------------------
//! - The log-likelihood never validates parameter *values*: out-of-domain
//!   shapes produce NaN or ±∞ so that an optimizer can back off.
//! - A parameter vector of the wrong length is a programming error for the
//!   log-likelihood (panic) and a recoverable error elsewhere.
//!
//! Conventions
//! -----------
//! - Parameter order is the order of [`Innovation::parameter_names`].
//!
//! Downstream usage
//! ----------------
//! - [`crate::volatility::models::Distribution`] pairs an `Innovation` with
//!   options and a random source and forwards to these methods.
use crate::volatility::{
    core::{
        constraints::{LinearConstraints, ParamBound},
        moments::degrees_of_freedom_guess,
        options::BoundsConfig,
        params::ShapeParams,
        validation::{
            validate_degrees_of_freedom, validate_ged_shape, validate_param_length,
            validate_probability, validate_skewness,
        },
    },
    errors::{DistError, DistResult},
    models::{
        LogDensity,
        generalized_error::{self, GedKernel},
        normal::{self, NormalKernel},
        skew_student::{self, SkewStudentKernel},
        students_t::{self, StudentsTKernel},
    },
};
use ndarray::{Array1, ArrayView1};
use std::{fmt, str::FromStr};

/// GED shape used as the starting value regardless of the sample.
pub const GED_STARTING_SHAPE: f64 = 1.5;

/// Innovation — which standardized distribution drives the model.
///
/// Variants
/// --------
/// - `Normal`: no shape parameters.
/// - `StudentsT`: `[nu]`, degrees of freedom.
/// - `SkewStudent`: `[eta, lambda]`, Hansen's skewed t.
/// - `GeneralizedError`: `[nu]`, GED shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Innovation {
    Normal,
    StudentsT,
    SkewStudent,
    GeneralizedError,
}

impl Innovation {
    /// All families, in a fixed order.
    pub const ALL: [Innovation; 4] = [
        Innovation::Normal,
        Innovation::StudentsT,
        Innovation::SkewStudent,
        Innovation::GeneralizedError,
    ];

    /// Number of shape parameters.
    pub fn num_params(&self) -> usize {
        self.parameter_names().len()
    }

    /// Shape parameter names in parameter-vector order.
    pub fn parameter_names(&self) -> &'static [&'static str] {
        match self {
            Innovation::Normal => &[],
            Innovation::StudentsT => &["nu"],
            Innovation::SkewStudent => &["eta", "lambda"],
            Innovation::GeneralizedError => &["nu"],
        }
    }

    /// Human-readable family name.
    pub fn name(&self) -> &'static str {
        match self {
            Innovation::Normal => "Normal",
            Innovation::StudentsT => "Standardized Student's t",
            Innovation::SkewStudent => "Standardized Skew Student's t",
            Innovation::GeneralizedError => "Generalized Error Distribution",
        }
    }

    /// Validate a raw parameter vector into typed shape parameters.
    ///
    /// Parameters
    /// ----------
    /// - `params`: `&[f64]`
    ///   Shape parameters in [`Innovation::parameter_names`] order.
    ///
    /// Returns
    /// -------
    /// `DistResult<ShapeParams>`
    ///
    /// Errors
    /// ------
    /// - `DistError::ParamLengthMismatch` for a vector of the wrong length.
    /// - `DistError::InvalidDegreesOfFreedom` for `nu` / `eta` not `> 2`.
    /// - `DistError::SkewnessTooLarge` / `SkewnessTooSmall` for `|lambda| >= 1`.
    /// - `DistError::InvalidGedShape` for a GED `nu` not `> 1`.
    pub fn validate_params(&self, params: &[f64]) -> DistResult<ShapeParams> {
        validate_param_length(params, self.num_params())?;
        let shape = match self {
            Innovation::Normal => ShapeParams::Normal,
            Innovation::StudentsT => {
                ShapeParams::StudentsT { nu: validate_degrees_of_freedom(params[0])? }
            }
            Innovation::SkewStudent => ShapeParams::SkewStudent {
                eta: validate_degrees_of_freedom(params[0])?,
                lambda: validate_skewness(params[1])?,
            },
            Innovation::GeneralizedError => {
                ShapeParams::GeneralizedError { nu: validate_ged_shape(params[0])? }
            }
        };
        Ok(shape)
    }

    /// Per-observation log-likelihood contributions.
    ///
    /// Element `i` is the log-density of `resids[i]` under this family
    /// rescaled by `sqrt(sigma2[i])`.
    ///
    /// # Panics
    /// Panics if `params.len() != num_params()` or
    /// `resids.len() != sigma2.len()`.
    pub fn loglikelihood_individual(
        &self, params: &[f64], resids: ArrayView1<'_, f64>, sigma2: ArrayView1<'_, f64>,
    ) -> Array1<f64> {
        assert_eq!(
            params.len(),
            self.num_params(),
            "{} expects {} parameters, got {}",
            self.name(),
            self.num_params(),
            params.len()
        );
        match self {
            Innovation::Normal => NormalKernel.log_densities(resids, sigma2),
            Innovation::StudentsT => StudentsTKernel::new(params[0]).log_densities(resids, sigma2),
            Innovation::SkewStudent => {
                SkewStudentKernel::new(params[0], params[1]).log_densities(resids, sigma2)
            }
            Innovation::GeneralizedError => GedKernel::new(params[0]).log_densities(resids, sigma2),
        }
    }

    /// Total log-likelihood, the sum of [`Innovation::loglikelihood_individual`].
    ///
    /// # Panics
    /// Same conditions as [`Innovation::loglikelihood_individual`].
    pub fn loglikelihood(
        &self, params: &[f64], resids: ArrayView1<'_, f64>, sigma2: ArrayView1<'_, f64>,
    ) -> f64 {
        let total = self.loglikelihood_individual(params, resids, sigma2).sum();
        if !total.is_finite() {
            log::debug!("{} log-likelihood is {total} at params {params:?}", self.name());
        }
        total
    }

    /// Box bounds for each shape parameter.
    ///
    /// `_resids` is accepted for contract compatibility with sample-dependent
    /// bounds; the current families use the configured constants only.
    pub fn bounds(&self, _resids: ArrayView1<'_, f64>, config: &BoundsConfig) -> Vec<ParamBound> {
        self.configured_bounds(config)
    }

    fn configured_bounds(&self, config: &BoundsConfig) -> Vec<ParamBound> {
        match self {
            Innovation::Normal => Vec::new(),
            Innovation::StudentsT => vec![config.students_t_nu],
            Innovation::SkewStudent => vec![config.skew_student_eta, config.skew_student_lambda],
            Innovation::GeneralizedError => vec![config.ged_nu],
        }
    }

    /// Linear inequality system `a · params ≥ b` encoding the bounds.
    pub fn constraints(&self, config: &BoundsConfig) -> LinearConstraints {
        LinearConstraints::from_bounds(&self.configured_bounds(config))
    }

    /// Data-driven starting values for maximum-likelihood estimation.
    ///
    /// Student's t and the skew-t use the kurtosis rule in
    /// [`degrees_of_freedom_guess`]; the skew-t starts symmetric and the GED
    /// starts at shape 1.5.
    pub fn starting_values(&self, resids: ArrayView1<'_, f64>) -> Array1<f64> {
        match self {
            Innovation::Normal => Array1::zeros(0),
            Innovation::StudentsT => Array1::from(vec![degrees_of_freedom_guess(resids)]),
            Innovation::SkewStudent => Array1::from(vec![degrees_of_freedom_guess(resids), 0.0]),
            Innovation::GeneralizedError => Array1::from(vec![GED_STARTING_SHAPE]),
        }
    }

    /// Standardized CDF evaluated elementwise at `x`.
    ///
    /// # Errors
    /// Any error of [`Innovation::validate_params`], or
    /// `DistError::StatrsRejected` if the `statrs` backend refuses the shape.
    pub fn cdf(&self, params: &[f64], x: ArrayView1<'_, f64>) -> DistResult<Array1<f64>> {
        let values = match self.validate_params(params)? {
            ShapeParams::Normal => x.iter().map(|&v| normal::cdf(v)).collect(),
            ShapeParams::StudentsT { nu } => students_t::cdf(nu, x.iter().copied())?,
            ShapeParams::SkewStudent { eta, lambda } => {
                skew_student::cdf(eta, lambda, x.iter().copied())?
            }
            ShapeParams::GeneralizedError { nu } => {
                generalized_error::cdf(nu, x.iter().copied())?
            }
        };
        Ok(Array1::from(values))
    }

    /// Standardized quantile function evaluated elementwise at `pits`.
    ///
    /// `0` maps to `-∞` and `1` to `+∞`.
    ///
    /// # Errors
    /// Any error of [`Innovation::validate_params`], or
    /// `DistError::InvalidProbability` for the first `pit` outside `[0, 1]`.
    pub fn ppf(&self, params: &[f64], pits: ArrayView1<'_, f64>) -> DistResult<Array1<f64>> {
        let shape = self.validate_params(params)?;
        for (index, &p) in pits.iter().enumerate() {
            validate_probability(index, p)?;
        }
        let pits = pits.iter().copied();
        let values = match shape {
            ShapeParams::Normal => pits.map(normal::ppf).collect(),
            ShapeParams::StudentsT { nu } => students_t::ppf(nu, pits)?,
            ShapeParams::SkewStudent { eta, lambda } => skew_student::ppf(eta, lambda, pits)?,
            ShapeParams::GeneralizedError { nu } => generalized_error::ppf(nu, pits)?,
        };
        Ok(Array1::from(values))
    }
}

impl fmt::Display for Innovation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Innovation {
    type Err = DistError;

    /// Parse a family from a short identifier, case-insensitively.
    ///
    /// Accepted: `normal` / `gaussian`, `t` / `studentst` / `students_t`,
    /// `skewt` / `skewstudent` / `skew_student`, `ged` /
    /// `generalized_error`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" | "gaussian" => Ok(Innovation::Normal),
            "t" | "studentst" | "students_t" => Ok(Innovation::StudentsT),
            "skewt" | "skewstudent" | "skew_student" => Ok(Innovation::SkewStudent),
            "ged" | "generalized_error" | "generalizederror" => Ok(Innovation::GeneralizedError),
            _ => Err(DistError::UnknownFamily { name: s.to_string() }),
        }
    }
}
