//! Distribution options — bound margins and RNG seeding.
//!
//! Purpose
//! -------
//! Collect the configuration knobs of an innovation distribution in one
//! place: the box bounds reported to the optimizer for each family
//! ([`BoundsConfig`]) and the seed of the random source used by `simulate`
//! ([`DistOptions`]).
//!
//! Key behaviors
//! -------------
//! - Provide defaults matching common practice for GARCH-type fitting:
//!   Student's t `nu ∈ [2.05, 500]`, skew-t `eta ∈ [2.05, 300]`,
//!   `lambda ∈ [-0.99, 0.99]`, GED `nu ∈ [1.01, 500]`.
//! - Validate custom bounds so that every point inside them is also accepted
//!   by `simulate` (degrees of freedom `> 2`, `|lambda| < 1`, GED shape `> 1`).
//!
//! Invariants & assumptions
//! ------------------------
//! - A [`BoundsConfig`] built through [`BoundsConfig::new`] or `Default`
//!   always lies strictly inside the family domains.
//! - `seed = None` defers to operating-system entropy at construction time
//!   of the distribution; `Some(seed)` gives reproducible draws.
//!
//! Testing notes
//! -------------
//! - Unit tests check the defaults and each rejection path of
//!   [`BoundsConfig::new`].
use crate::volatility::{
    core::{
        constraints::ParamBound,
        validation::{MIN_DEGREES_OF_FREEDOM, MIN_GED_SHAPE},
    },
    errors::{DistError, DistResult},
};

/// BoundsConfig — per-family box bounds handed to the optimizer.
///
/// Fields
/// ------
/// - `students_t_nu`: bound on Student's t degrees of freedom.
/// - `skew_student_eta`: bound on skew-t degrees of freedom.
/// - `skew_student_lambda`: bound on skew-t asymmetry.
/// - `ged_nu`: bound on the GED shape.
///
/// Invariants
/// ----------
/// - `students_t_nu.lower > 2`, `skew_student_eta.lower > 2`.
/// - `-1 < skew_student_lambda.lower < skew_student_lambda.upper < 1`.
/// - `ged_nu.lower > 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsConfig {
    pub students_t_nu: ParamBound,
    pub skew_student_eta: ParamBound,
    pub skew_student_lambda: ParamBound,
    pub ged_nu: ParamBound,
}

impl BoundsConfig {
    /// Construct a validated bounds configuration.
    ///
    /// Parameters
    /// ----------
    /// - `students_t_nu`, `skew_student_eta`: `ParamBound`
    ///   Lower ends must exceed 2.
    /// - `skew_student_lambda`: `ParamBound`
    ///   Must lie strictly inside `(-1, 1)`.
    /// - `ged_nu`: `ParamBound`
    ///   Lower end must exceed 1.
    ///
    /// Returns
    /// -------
    /// `DistResult<BoundsConfig>`
    ///
    /// Errors
    /// ------
    /// - `DistError::InvalidBound`
    ///   When a bound leaves its family domain; the `reason` names the family.
    pub fn new(
        students_t_nu: ParamBound, skew_student_eta: ParamBound, skew_student_lambda: ParamBound,
        ged_nu: ParamBound,
    ) -> DistResult<Self> {
        check_lower_above(students_t_nu, MIN_DEGREES_OF_FREEDOM, "Student's t nu must stay > 2.")?;
        check_lower_above(skew_student_eta, MIN_DEGREES_OF_FREEDOM, "skew-t eta must stay > 2.")?;
        if skew_student_lambda.lower <= -1.0 || skew_student_lambda.upper >= 1.0 {
            return Err(DistError::InvalidBound {
                lower: skew_student_lambda.lower,
                upper: skew_student_lambda.upper,
                reason: "skew-t lambda must stay inside (-1, 1).",
            });
        }
        check_lower_above(ged_nu, MIN_GED_SHAPE, "GED nu must stay > 1.")?;
        Ok(BoundsConfig { students_t_nu, skew_student_eta, skew_student_lambda, ged_nu })
    }
}

fn check_lower_above(bound: ParamBound, floor: f64, reason: &'static str) -> DistResult<()> {
    if bound.lower <= floor {
        return Err(DistError::InvalidBound { lower: bound.lower, upper: bound.upper, reason });
    }
    Ok(())
}

impl Default for BoundsConfig {
    fn default() -> Self {
        BoundsConfig {
            students_t_nu: ParamBound { lower: 2.05, upper: 500.0 },
            skew_student_eta: ParamBound { lower: 2.05, upper: 300.0 },
            skew_student_lambda: ParamBound { lower: -0.99, upper: 0.99 },
            ged_nu: ParamBound { lower: 1.01, upper: 500.0 },
        }
    }
}

/// DistOptions — construction-time configuration for a distribution.
///
/// Purpose
/// -------
/// Bundle the RNG seed and the optimizer bounds for one distribution
/// instance.
///
/// Fields
/// ------
/// - `seed`: `Option<u64>`
///   `Some(seed)` yields reproducible simulations; `None` seeds from
///   operating-system entropy.
/// - `bounds`: [`BoundsConfig`]
///   Bounds reported by `bounds` / `constraints`.
///
/// Notes
/// -----
/// - The default is unseeded with default bounds; tests and Monte-Carlo
///   studies that need reproducibility should use [`DistOptions::seeded`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DistOptions {
    pub seed: Option<u64>,
    pub bounds: BoundsConfig,
}

impl DistOptions {
    /// Construct options from explicit parts.
    pub fn new(seed: Option<u64>, bounds: BoundsConfig) -> DistOptions {
        DistOptions { seed, bounds }
    }

    /// Default bounds with a fixed seed.
    ///
    /// ```rust
    /// # use rust_volatility::volatility::core::options::DistOptions;
    /// let opts = DistOptions::seeded(12345);
    /// assert_eq!(opts.seed, Some(12345));
    /// ```
    pub fn seeded(seed: u64) -> DistOptions {
        DistOptions { seed: Some(seed), bounds: BoundsConfig::default() }
    }
}
