//! models — per-family density kernels, CDFs, quantiles, and samplers.
//!
//! Purpose
//! -------
//! Hold the closed-form statistics of each innovation family behind a small
//! shared surface, plus the [`Distribution`] type that packages one family,
//! its options, and its random source behind the uniform contract.
//!
//! Key behaviors
//! -------------
//! - Each family module exposes a kernel type implementing [`LogDensity`]
//!   with its normalizing constants precomputed once per parameter vector, a
//!   standardized `cdf` / `ppf`, and a sampler implementing
//!   [`InnovationSampler`].
//! - [`LogDensity::log_densities`] evaluates the kernel elementwise over
//!   residual and variance series, so the per-observation loop is written
//!   once.
//!
//! Invariants & assumptions
//! ------------------------
//! - Kernels evaluate the log-density of `x` under the standardized family
//!   rescaled by `sqrt(sigma2)`; they work in log-space throughout and never
//!   exponentiate the raw density.
//! - Kernels accept out-of-domain parameters and return degenerate values
//!   (NaN, ±∞) instead of failing; samplers are only built from validated
//!   [`ShapeParams`](crate::volatility::core::params::ShapeParams).
//!
//! Conventions
//! -----------
//! - "Standardized" means zero mean and unit variance before variance
//!   scaling.
//! - `pits` are probability integral transform values in `[0, 1]`.

pub mod distribution;
pub mod generalized_error;
pub mod normal;
pub mod skew_student;
pub mod students_t;

use crate::volatility::core::validation::assert_same_length;
use ndarray::{Array1, ArrayView1, Zip};
use rand::Rng;

pub use self::distribution::{Distribution, Simulator};

/// Log-density of one residual given its conditional variance.
pub trait LogDensity {
    /// `ln f(x; sigma2)` for a single observation.
    fn ln_pdf(&self, x: f64, sigma2: f64) -> f64;

    /// Elementwise log-densities over aligned residual / variance series.
    ///
    /// # Panics
    /// Panics if `resids.len() != sigma2.len()`.
    fn log_densities(
        &self, resids: ArrayView1<'_, f64>, sigma2: ArrayView1<'_, f64>,
    ) -> Array1<f64> {
        assert_same_length(resids, sigma2);
        Zip::from(&resids).and(&sigma2).map_collect(|&x, &s2| self.ln_pdf(x, s2))
    }
}

/// Draws one standardized innovation per call.
pub trait InnovationSampler {
    fn sample<R: Rng>(&self, rng: &mut R) -> f64;
}

/// Quantile wrapper that maps the closed ends of `[0, 1]` to `∓∞` before
/// calling an inverse CDF defined on the open interval.
#[inline]
pub(crate) fn quantile_with_tails(p: f64, interior: impl FnOnce(f64) -> f64) -> f64 {
    if p == 0.0 {
        f64::NEG_INFINITY
    } else if p == 1.0 {
        f64::INFINITY
    } else {
        interior(p)
    }
}
