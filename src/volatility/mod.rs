//! volatility — standardized innovation distributions for volatility models.
//!
//! Purpose
//! -------
//! Provide the error-distribution layer of ARCH / GARCH-type models: the
//! Normal, standardized Student's t, Hansen's skewed Student's t, and the
//! Generalized Error Distribution, each with log-likelihood evaluation,
//! optimizer bounds and linear constraints, data-driven starting values,
//! standardized CDF / quantile functions, and reproducible simulation.
//!
//! Key behaviors
//! -------------
//! - [`core`] holds the family tag [`Innovation`], validated parameters,
//!   bounds / constraint types, options, and validation helpers.
//! - [`models`] holds the per-family kernels and the user-facing
//!   [`Distribution`] / [`Simulator`] pair.
//! - [`errors`] defines [`DistError`] and [`DistResult`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Every innovation has zero mean and unit variance before it is scaled by
//!   the conditional standard deviation `sqrt(sigma2)`.
//! - Log-likelihoods are computed in log-space and tolerate out-of-domain
//!   parameters; the validating operations (`simulate`, `cdf`, `ppf`) reject
//!   them with a typed error.
//!
//! Downstream usage
//! ----------------
//! 1. Build a [`Distribution`] with [`DistOptions`] (seed, bounds).
//! 2. Hand `starting_values`, `bounds` and `constraints` to an optimizer and
//!    evaluate `loglikelihood` inside its objective.
//! 3. Use `simulate(params)?.draw(n)` for forecasting and bootstrap draws.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each kernel and in [`core`]; the integration
//!   test under `tests/` runs the full contract for all four families on a
//!   seeded residual sample.

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    BoundsConfig, DistOptions, Innovation, LinearConstraints, ParamBound, ShapeParams,
};

pub use self::errors::{DistError, DistResult};

pub use self::models::{Distribution, Simulator};

// ---- Optional convenience prelude for downstream crates -------------------
//
//     use rust_volatility::volatility::prelude::*;

pub mod prelude {
    pub use super::{
        BoundsConfig, DistError, DistOptions, DistResult, Distribution, Innovation,
        LinearConstraints, ParamBound, ShapeParams, Simulator,
    };
}
