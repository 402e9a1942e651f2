//! Normal innovations — the zero-parameter baseline family.
use crate::volatility::models::{InnovationSampler, LogDensity, quantile_with_tails};
use rand::Rng;
use rand_distr::{Distribution as _, StandardNormal};
use statrs::function::erf::{erfc, erfc_inv};
use std::f64::consts::SQRT_2;

/// `ln(2π)`.
const LN_2PI: f64 = 1.837_877_066_409_345_5;

/// Gaussian log-density kernel with variance `sigma2`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NormalKernel;

impl LogDensity for NormalKernel {
    #[inline]
    fn ln_pdf(&self, x: f64, sigma2: f64) -> f64 {
        -0.5 * (LN_2PI + sigma2.ln() + x * x / sigma2)
    }
}

/// Standard normal CDF `Φ(x) = ½ erfc(−x/√2)`.
pub fn cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Standard normal quantile `Φ⁻¹(p) = −√2 erfc⁻¹(2p)`.
pub fn ppf(p: f64) -> f64 {
    quantile_with_tails(p, |p| -SQRT_2 * erfc_inv(2.0 * p))
}

/// Standard normal sampler.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalSampler;

impl InnovationSampler for NormalSampler {
    #[inline]
    fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        StandardNormal.sample(rng)
    }
}
