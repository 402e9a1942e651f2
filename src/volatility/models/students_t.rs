//! Standardized Student's t innovations.
//!
//! The density is the Student's t with `nu` degrees of freedom rescaled to
//! unit variance:
//!
//! `f(x; v) = Γ((ν+1)/2) / (Γ(ν/2) sqrt(π(ν−2)v)) · (1 + x²/(v(ν−2)))^(−(ν+1)/2)`
//!
//! All constants are carried in log form via `ln_gamma`, so large `nu`
//! (where the gamma ratio overflows) stays finite.
//!
//! ## Numerics
//! - A draw from the textbook `t_ν` has variance `ν/(ν−2)`; samplers and
//!   CDF / quantile conversions divide or multiply by `sqrt(ν/(ν−2))`.
//! - The CDF and quantile delegate to `statrs::distribution::StudentsT`.
use crate::volatility::{
    errors::{DistError, DistResult},
    models::{InnovationSampler, LogDensity, quantile_with_tails},
};
use rand::Rng;
use rand_distr::{Distribution as _, StudentT};
use statrs::{
    distribution::{ContinuousCDF, StudentsT},
    function::gamma::ln_gamma,
};
use std::f64::consts::PI;

/// Log-normalizing constant `lnΓ((ν+1)/2) − lnΓ(ν/2) − ½ ln(π(ν−2))`.
///
/// Shared with the skew-t, whose `c` constant is this value exponentiated.
pub fn ln_unit_variance_constant(nu: f64) -> f64 {
    ln_gamma(0.5 * (nu + 1.0)) - ln_gamma(0.5 * nu) - 0.5 * (PI * (nu - 2.0)).ln()
}

/// `sqrt(ν/(ν−2))`, the standard deviation of a textbook `t_ν` draw.
#[inline]
pub fn textbook_std(nu: f64) -> f64 {
    (nu / (nu - 2.0)).sqrt()
}

/// Unit-variance Student's t log-density kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StudentsTKernel {
    nu: f64,
    ln_const: f64,
    half_power: f64,
}

impl StudentsTKernel {
    /// Precompute constants for `nu`. Out-of-domain values are accepted and
    /// yield NaN densities.
    pub fn new(nu: f64) -> Self {
        let ln_const = ln_unit_variance_constant(nu);
        StudentsTKernel { nu, ln_const, half_power: 0.5 * (nu + 1.0) }
    }
}

impl LogDensity for StudentsTKernel {
    #[inline]
    fn ln_pdf(&self, x: f64, sigma2: f64) -> f64 {
        self.ln_const
            - 0.5 * sigma2.ln()
            - self.half_power * (x * x / (sigma2 * (self.nu - 2.0))).ln_1p()
    }
}

/// Standardized CDF of each element of `x`.
///
/// # Errors
/// [`DistError::StatrsRejected`] if `statrs` refuses `nu`.
pub fn cdf(nu: f64, x: impl IntoIterator<Item = f64>) -> DistResult<Vec<f64>> {
    let t = StudentsT::new(0.0, 1.0, nu)?;
    let scale = textbook_std(nu);
    Ok(x.into_iter().map(|v| if v.is_nan() { f64::NAN } else { t.cdf(v * scale) }).collect())
}

/// Standardized quantiles for probabilities already checked to lie in `[0, 1]`.
pub fn ppf(nu: f64, pits: impl IntoIterator<Item = f64>) -> DistResult<Vec<f64>> {
    let t = StudentsT::new(0.0, 1.0, nu)?;
    let scale = textbook_std(nu);
    Ok(pits.into_iter().map(|p| quantile_with_tails(p, |p| t.inverse_cdf(p)) / scale).collect())
}

/// Unit-variance Student's t sampler: a `t_ν` draw divided by `sqrt(ν/(ν−2))`.
#[derive(Debug, Clone)]
pub struct StudentsTSampler {
    t: StudentT<f64>,
    scale: f64,
}

impl StudentsTSampler {
    /// Build a sampler for a validated `nu > 2`.
    pub fn new(nu: f64) -> DistResult<Self> {
        let t =
            StudentT::new(nu).map_err(|e| DistError::SamplerRejected { reason: e.to_string() })?;
        Ok(StudentsTSampler { t, scale: textbook_std(nu) })
    }
}

impl InnovationSampler for StudentsTSampler {
    #[inline]
    fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        self.t.sample(rng) / self.scale
    }
}
