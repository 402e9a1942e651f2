//! Hansen (1994) skewed Student's t innovations.
//!
//! Purpose
//! -------
//! Provide the log-density, CDF, quantile, and sampler of the standardized
//! skewed Student's t with degrees of freedom `eta > 2` and asymmetry
//! `-1 < lambda < 1`.
//!
//! Key behaviors
//! -------------
//! - Precompute the constants
//!   `c = Γ((η+1)/2) / (sqrt(π(η−2)) Γ(η/2))`,
//!   `a = 4λc(η−2)/(η−1)`,
//!   `b = sqrt(1 + 3λ² − a²)`
//!   once per parameter vector in [`SkewStudentKernel::new`].
//! - Splice two half-t densities at the mode `z = −a/b`: the left branch
//!   divides `b·z + a` by `1 − λ`, the right branch by `1 + λ`. The branch is
//!   an explicit comparison; the kink at `−a/b` belongs to the density.
//! - Invert the spliced CDF branch by branch for the quantile function and
//!   sample by inverse transform of `Open01` uniforms.
//!
//! Invariants & assumptions
//! ------------------------
//! - For admissible `(eta, lambda)`, `b > 0`, so `z < −a/b` is equivalent to
//!   `b·z + a < 0`.
//! - The distribution has mean 0 and variance 1 by construction of `a` and
//!   `b`; `lambda = 0` recovers the unit-variance Student's t.
//! - The CDF at the splice point equals `(1 − λ)/2`.
//!
//! Conventions
//! -----------
//! - `z = x / sqrt(sigma2)` is the standardized residual.
//! - `T_η` denotes the textbook Student's t CDF with `η` degrees of freedom
//!   (`statrs::distribution::StudentsT`).
use crate::volatility::{
    errors::DistResult,
    models::{
        InnovationSampler, LogDensity, quantile_with_tails, students_t::ln_unit_variance_constant,
    },
};
use rand::Rng;
use rand_distr::{Distribution as _, Open01};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// SkewStudentKernel — Hansen's skewed-t with precomputed constants.
///
/// Fields
/// ------
/// - `eta`, `lambda`: shape parameters as supplied (possibly out of domain).
/// - `a`, `b`: location / scale constants of the splice.
/// - `ln_bc`: `ln(b·c)`, the log-normalizer shared by both branches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkewStudentKernel {
    eta: f64,
    lambda: f64,
    a: f64,
    b: f64,
    ln_bc: f64,
}

impl SkewStudentKernel {
    /// Precompute the splice constants.
    ///
    /// Parameters
    /// ----------
    /// - `eta`: `f64`
    ///   Degrees of freedom. Values `≤ 2` produce NaN constants rather than
    ///   an error; the optimizer's bounds keep it away from there.
    /// - `lambda`: `f64`
    ///   Asymmetry. `lambda > 0` puts more mass in the right tail.
    pub fn new(eta: f64, lambda: f64) -> Self {
        let ln_c = ln_unit_variance_constant(eta);
        let c = ln_c.exp();
        let a = 4.0 * lambda * c * (eta - 2.0) / (eta - 1.0);
        let b = (1.0 + 3.0 * lambda * lambda - a * a).sqrt();
        SkewStudentKernel { eta, lambda, a, b, ln_bc: b.ln() + ln_c }
    }

    /// Location constant `a`.
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Scale constant `b`.
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Splice point `−a/b` in standardized units.
    pub fn splice_point(&self) -> f64 {
        -self.a / self.b
    }

    /// Branch divisor: `1 − λ` left of the splice point, `1 + λ` otherwise.
    #[inline]
    fn branch_scale(&self, z: f64) -> f64 {
        if z < self.splice_point() { 1.0 - self.lambda } else { 1.0 + self.lambda }
    }

    /// Standardized CDF at `z`.
    ///
    /// With `s = sqrt(η/(η−2))`:
    /// - `z < −a/b`: `(1−λ) T_η((b·z + a)/(1−λ) · s)`
    /// - otherwise: `(1−λ)/2 + (1+λ)(T_η((b·z + a)/(1+λ) · s) − ½)`
    pub fn cdf(&self, t: &StudentsT, z: f64) -> f64 {
        if z.is_nan() {
            return f64::NAN;
        }
        let s = (self.eta / (self.eta - 2.0)).sqrt();
        let y = (self.b * z + self.a) * s;
        if z < self.splice_point() {
            (1.0 - self.lambda) * t.cdf(y / (1.0 - self.lambda))
        } else {
            0.5 * (1.0 - self.lambda) + (1.0 + self.lambda) * (t.cdf(y / (1.0 + self.lambda)) - 0.5)
        }
    }

    /// Standardized quantile for `p ∈ [0, 1]`.
    ///
    /// Below the splice probability `(1−λ)/2` the left branch is inverted,
    /// otherwise the right branch:
    /// - `p < (1−λ)/2`: `t = T_η⁻¹(p/(1−λ))`, `z = ((1−λ)·t·sqrt(1−2/η) − a)/b`
    /// - else: `t = T_η⁻¹(½ + (p − (1−λ)/2)/(1+λ))`,
    ///   `z = ((1+λ)·t·sqrt(1−2/η) − a)/b`
    pub fn quantile(&self, t: &StudentsT, p: f64) -> f64 {
        quantile_with_tails(p, |p| {
            let splice_prob = 0.5 * (1.0 - self.lambda);
            let (tq, scale) = if p < splice_prob {
                (t.inverse_cdf(p / (1.0 - self.lambda)), 1.0 - self.lambda)
            } else {
                (t.inverse_cdf(0.5 + (p - splice_prob) / (1.0 + self.lambda)), 1.0 + self.lambda)
            };
            (scale * tq * (1.0 - 2.0 / self.eta).sqrt() - self.a) / self.b
        })
    }
}

impl LogDensity for SkewStudentKernel {
    /// `ln(bc) − ½ ln v − ((η+1)/2) ln(1 + ((b·z + a)/(1 ± λ))²/(η−2))`.
    #[inline]
    fn ln_pdf(&self, x: f64, sigma2: f64) -> f64 {
        let z = x / sigma2.sqrt();
        let u = (self.b * z + self.a) / self.branch_scale(z);
        self.ln_bc - 0.5 * sigma2.ln() - 0.5 * (self.eta + 1.0) * (u * u / (self.eta - 2.0)).ln_1p()
    }
}

/// Standardized CDF for validated `(eta, lambda)`.
pub fn cdf(eta: f64, lambda: f64, x: impl IntoIterator<Item = f64>) -> DistResult<Vec<f64>> {
    let kernel = SkewStudentKernel::new(eta, lambda);
    let t = StudentsT::new(0.0, 1.0, eta)?;
    Ok(x.into_iter().map(|z| kernel.cdf(&t, z)).collect())
}

/// Standardized quantiles for validated `(eta, lambda)` and checked `pits`.
pub fn ppf(eta: f64, lambda: f64, pits: impl IntoIterator<Item = f64>) -> DistResult<Vec<f64>> {
    let kernel = SkewStudentKernel::new(eta, lambda);
    let t = StudentsT::new(0.0, 1.0, eta)?;
    Ok(pits.into_iter().map(|p| kernel.quantile(&t, p)).collect())
}

/// Inverse-transform sampler for the skewed t.
#[derive(Debug, Clone)]
pub struct SkewStudentSampler {
    kernel: SkewStudentKernel,
    t: StudentsT,
}

impl SkewStudentSampler {
    /// Build a sampler for validated `eta > 2`, `-1 < lambda < 1`.
    pub fn new(eta: f64, lambda: f64) -> DistResult<Self> {
        Ok(SkewStudentSampler {
            kernel: SkewStudentKernel::new(eta, lambda),
            t: StudentsT::new(0.0, 1.0, eta)?,
        })
    }
}

impl InnovationSampler for SkewStudentSampler {
    #[inline]
    fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        let u: f64 = Open01.sample(rng);
        self.kernel.quantile(&self.t, u)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volatility::models::students_t::StudentsTKernel;
    use approx::assert_relative_eq;
    use statrs::function::gamma::gamma;
    use std::f64::consts::PI;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The spliced log-density against the direct Hansen formula, on both
    //   sides of the splice point.
    // - Reduction to the unit-variance Student's t at lambda = 0.
    // - CDF value at the splice point and CDF / quantile consistency.
    //
    // They intentionally DO NOT cover:
    // - Moments of simulated draws; those live in the integration tests.
    // -------------------------------------------------------------------------

    fn direct_pdf(eta: f64, lam: f64, x: f64, s2: f64) -> f64 {
        let c = gamma((eta + 1.0) / 2.0) / ((PI * (eta - 2.0)).sqrt() * gamma(eta / 2.0));
        let a = 4.0 * lam * c * (eta - 2.0) / (eta - 1.0);
        let b = (1.0 + 3.0 * lam * lam - a * a).sqrt();
        let z = x / s2.sqrt();
        let sign = (z + a / b).signum();
        let base = (b * z + a) / (1.0 + sign * lam);
        b * c / s2.sqrt() * (1.0 + base * base / (eta - 2.0)).powf(-(eta + 1.0) / 2.0)
    }

    #[test]
    // Purpose
    // -------
    // The kernel equals the log of Hansen's density on both branches.
    //
    // Given
    // -----
    // - eta = 4, lambda = 0.5 and residuals well left and right of −a/b.
    //
    // Expect
    // ------
    // - Agreement to 1e-12 for every point.
    fn skew_student_kernel_matches_direct_density_on_both_branches() {
        let (eta, lam) = (4.0, 0.5);
        let kernel = SkewStudentKernel::new(eta, lam);
        for (x, s2) in [(-2.5, 1.2), (-0.9, 1.0), (0.0, 1.5), (0.4, 1.1), (3.1, 1.9)] {
            let expected = direct_pdf(eta, lam, x, s2).ln();
            assert_relative_eq!(kernel.ln_pdf(x, s2), expected, epsilon = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // A symmetric skew-t is the unit-variance Student's t.
    //
    // Given
    // -----
    // - eta = 7, lambda = 0.
    //
    // Expect
    // ------
    // - a = 0, b = 1 and identical log-densities.
    fn skew_student_with_zero_lambda_reduces_to_students_t() {
        let skew = SkewStudentKernel::new(7.0, 0.0);
        let sym = StudentsTKernel::new(7.0);
        assert_relative_eq!(skew.a(), 0.0, epsilon = 1e-15);
        assert_relative_eq!(skew.b(), 1.0, epsilon = 1e-15);
        for x in [-3.0, -0.2, 0.0, 1.7] {
            assert_relative_eq!(skew.ln_pdf(x, 1.3), sym.ln_pdf(x, 1.3), epsilon = 1e-13);
        }
    }

    #[test]
    // Purpose
    // -------
    // The CDF at the splice point equals (1 − λ)/2.
    //
    // Given
    // -----
    // - eta = 5, lambda = −0.3.
    //
    // Expect
    // ------
    // - cdf(−a/b) = 0.65.
    fn skew_student_cdf_at_splice_point_is_left_mass() {
        let kernel = SkewStudentKernel::new(5.0, -0.3);
        let t = StudentsT::new(0.0, 1.0, 5.0).unwrap();
        assert_relative_eq!(kernel.cdf(&t, kernel.splice_point()), 0.65, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // The branch-aware quantile inverts the CDF on both sides of the splice.
    //
    // Given
    // -----
    // - eta = 6, lambda = 0.4; probabilities below and above (1 − λ)/2 = 0.3.
    //
    // Expect
    // ------
    // - cdf(ppf(p)) ≈ p; quantiles are increasing.
    fn skew_student_ppf_inverts_cdf() {
        let probs = [0.01, 0.2, 0.3, 0.55, 0.99];
        let q = ppf(6.0, 0.4, probs).unwrap();
        let back = cdf(6.0, 0.4, q.iter().copied()).unwrap();
        for (p, b) in probs.iter().zip(back.iter()) {
            assert_relative_eq!(*p, *b, epsilon = 1e-7);
        }
        assert!(q.windows(2).all(|w| w[0] < w[1]), "quantiles not increasing: {q:?}");
    }
}
