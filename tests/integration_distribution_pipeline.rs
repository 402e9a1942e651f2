//! Integration tests for the innovation-distribution contract.
//!
//! Purpose
//! -------
//! - Run every family through the calls a volatility-model fit makes:
//!   starting values, bounds, constraints, log-likelihood, then simulation
//!   and quantiles at the chosen parameters.
//! - Check the log-likelihood of each family against a direct evaluation of
//!   its density formula on a seeded residual sample.
//!
//! Coverage
//! --------
//! - `volatility::models::Distribution` for all four families.
//! - `volatility::core::{BoundsConfig, DistOptions}` as configuration input.
//! - Error paths of `simulate` and `ppf`, GED `cdf` at the median and in
//!   the far tails, and repeatability of the log-likelihood.
//!
//! Exclusions
//! ----------
//! - Kernel-level numerics (large degrees of freedom, splice points, gamma
//!   inversion) are covered by unit tests next to each kernel.
//! - Python bindings.
use approx::assert_relative_eq;
use ndarray::{Array1, array};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::{Distribution as _, StandardNormal};
use rust_volatility::volatility::{
    DistError, DistOptions, Distribution, Innovation,
    core::{BoundsConfig, ParamBound},
};
use statrs::function::gamma::gamma;
use std::f64::consts::PI;

/// Seeded residuals and conditional variances: `n` standard normal draws and
/// `sigma2 = 1 + U(0, 1)`.
fn residual_sample(n: usize) -> (Array1<f64>, Array1<f64>) {
    let mut rng = StdRng::seed_from_u64(12345);
    let resids = Array1::from_shape_fn(n, |_| StandardNormal.sample(&mut rng));
    let sigma2 = Array1::from_shape_fn(n, |_| 1.0 + rng.random::<f64>());
    (resids, sigma2)
}

fn direct_total(resids: &Array1<f64>, sigma2: &Array1<f64>, pdf: impl Fn(f64, f64) -> f64) -> f64 {
    resids.iter().zip(sigma2.iter()).map(|(&x, &s2)| pdf(x, s2).ln()).sum()
}

#[test]
// Purpose
// -------
// Each family's log-likelihood equals the sum of log direct densities.
//
// Given
// -----
// - 1000 seeded residuals and variances.
// - Normal, t(4), skew-t(4, 0.5), GED(1.5).
//
// Expect
// ------
// - Aggregate values agree to 1e-10 relative; individual sums equal totals.
fn loglikelihood_matches_direct_density_for_every_family() {
    // Arrange
    let (resids, sigma2) = residual_sample(1000);
    let opts = DistOptions::seeded(1);

    let normal = |x: f64, s2: f64| (-0.5 * x * x / s2).exp() / (2.0 * PI * s2).sqrt();
    let t = |x: f64, s2: f64| {
        let nu = 4.0;
        gamma((nu + 1.0) / 2.0) / (gamma(nu / 2.0) * (PI * (nu - 2.0) * s2).sqrt())
            * (1.0 + x * x / (s2 * (nu - 2.0))).powf(-(nu + 1.0) / 2.0)
    };
    let skew = |x: f64, s2: f64| {
        let (eta, lam) = (4.0_f64, 0.5_f64);
        let c = gamma((eta + 1.0) / 2.0) / ((PI * (eta - 2.0)).sqrt() * gamma(eta / 2.0));
        let a = 4.0 * lam * c * (eta - 2.0) / (eta - 1.0);
        let b = (1.0 + 3.0 * lam * lam - a * a).sqrt();
        let z = x / s2.sqrt();
        let denom = if z < -a / b { 1.0 - lam } else { 1.0 + lam };
        let u = (b * z + a) / denom;
        b * c / s2.sqrt() * (1.0 + u * u / (eta - 2.0)).powf(-(eta + 1.0) / 2.0)
    };
    let ged = |x: f64, s2: f64| {
        let nu = 1.5_f64;
        let c = (2.0_f64.powf(-2.0 / nu) * gamma(1.0 / nu) / gamma(3.0 / nu)).sqrt();
        nu * (-0.5 * (x / (c * s2.sqrt())).abs().powf(nu)).exp()
            / (c * 2.0_f64.powf(1.0 + 1.0 / nu) * gamma(1.0 / nu) * s2.sqrt())
    };

    let cases: [(Distribution, Vec<f64>, f64); 4] = [
        (Distribution::normal(opts), vec![], direct_total(&resids, &sigma2, normal)),
        (Distribution::students_t(opts), vec![4.0], direct_total(&resids, &sigma2, t)),
        (Distribution::skew_student(opts), vec![4.0, 0.5], direct_total(&resids, &sigma2, skew)),
        (Distribution::generalized_error(opts), vec![1.5], direct_total(&resids, &sigma2, ged)),
    ];

    for (dist, params, expected) in cases {
        // Act
        let total = dist.loglikelihood(&params, resids.view(), sigma2.view());
        let individual = dist.loglikelihood_individual(&params, resids.view(), sigma2.view());

        // Assert
        assert_relative_eq!(total, expected, max_relative = 1e-10);
        assert_eq!(individual.len(), resids.len());
        assert_relative_eq!(individual.sum(), total, max_relative = 1e-12);
    }
}

#[test]
// Purpose
// -------
// Starting values, bounds and constraints are mutually consistent and have
// the documented shapes.
//
// Given
// -----
// - The seeded normal sample (kurtosis near 3, so the df default applies).
//
// Expect
// ------
// - t: [12], skew-t: [12, 0], GED: [1.5], Normal: [].
// - Constraint shapes (0, 0), (2, 1), (4, 2), (2, 1), and starting values
//   satisfy their own constraints.
fn fitting_inputs_are_consistent() {
    let (resids, _) = residual_sample(1000);
    let expected_starts: [Array1<f64>; 4] =
        [Array1::zeros(0), array![12.0], array![12.0, 0.0], array![1.5]];
    let shapes = [(0, 0), (2, 1), (4, 2), (2, 1)];

    for ((family, start), shape) in Innovation::ALL.into_iter().zip(expected_starts).zip(shapes) {
        let dist = Distribution::new(family, DistOptions::seeded(5));
        let sv = dist.starting_values(resids.view());
        let bounds = dist.bounds(resids.view());
        let cons = dist.constraints();

        assert_eq!(sv, start, "{family}");
        assert_eq!(bounds.len(), family.num_params());
        assert_eq!(cons.a.dim(), shape);
        assert_eq!(cons.b.len(), shape.0);
        assert!(cons.is_satisfied(sv.as_slice().unwrap()), "{family}: start violates bounds");
        for (b, v) in bounds.iter().zip(sv.iter()) {
            assert!(b.contains(*v));
        }
    }
}

#[test]
// Purpose
// -------
// Fat-tailed samples pull the df starting value down via the kurtosis rule.
//
// Given
// -----
// - 20_000 draws from a t(5) distribution (population kurtosis 9).
//
// Expect
// ------
// - A Student's t starting value between 4 and 12.
fn starting_values_react_to_fat_tails() {
    let mut dist = Distribution::students_t(DistOptions::seeded(77));
    let draws = dist.simulate(&[5.0]).unwrap().draw(20_000);
    let sv = dist.starting_values(draws.view());
    assert!(sv[0] >= 4.0 && sv[0] < 12.0, "df starting value {}", sv[0]);
}

#[test]
// Purpose
// -------
// Custom bounds flow through to bounds and constraints.
fn custom_bounds_reach_constraint_system() {
    let bounds = BoundsConfig::new(
        ParamBound::new(2.5, 100.0).unwrap(),
        ParamBound::new(3.0, 50.0).unwrap(),
        ParamBound::new(-0.5, 0.5).unwrap(),
        ParamBound::new(1.1, 10.0).unwrap(),
    )
    .unwrap();
    let dist = Distribution::skew_student(DistOptions::new(Some(1), bounds));
    let cons = dist.constraints();
    assert_eq!(cons.b, array![3.0, -50.0, -0.5, -0.5]);

    let err = BoundsConfig::new(
        ParamBound::new(1.5, 100.0).unwrap(),
        ParamBound::new(3.0, 50.0).unwrap(),
        ParamBound::new(-0.5, 0.5).unwrap(),
        ParamBound::new(1.1, 10.0).unwrap(),
    )
    .unwrap_err();
    assert!(matches!(err, DistError::InvalidBound { .. }));
}

#[test]
// Purpose
// -------
// Simulation returns the requested number of draws and rejects invalid
// parameters with the matching error variant.
//
// Given
// -----
// - Admissible parameters per family, then the invalid vectors
//   t(1), skew-t(1, 0.2), skew-t(4, 1.1), skew-t(4, -1.1), GED(0.9).
//
// Expect
// ------
// - 1000 draws on success; the documented variants on failure.
fn simulate_draw_counts_and_errors() {
    let cases: [(Innovation, Vec<f64>); 4] = [
        (Innovation::Normal, vec![]),
        (Innovation::StudentsT, vec![8.0]),
        (Innovation::SkewStudent, vec![8.0, -0.3]),
        (Innovation::GeneralizedError, vec![1.5]),
    ];
    for (family, params) in cases {
        let mut dist = Distribution::new(family, DistOptions::seeded(12345));
        let draws = dist.simulate(&params).unwrap().draw(1000);
        assert_eq!(draws.len(), 1000);
        assert!(draws.iter().all(|v| v.is_finite()));
    }

    let opts = DistOptions::seeded(0);
    let mut t = Distribution::students_t(opts);
    let mut skew = Distribution::skew_student(opts);
    let mut ged = Distribution::generalized_error(opts);
    assert!(matches!(t.simulate(&[1.0]), Err(DistError::InvalidDegreesOfFreedom { .. })));
    assert!(matches!(skew.simulate(&[1.0, 0.2]), Err(DistError::InvalidDegreesOfFreedom { .. })));
    assert!(matches!(skew.simulate(&[4.0, 1.1]), Err(DistError::SkewnessTooLarge { .. })));
    assert!(matches!(skew.simulate(&[4.0, -1.1]), Err(DistError::SkewnessTooSmall { .. })));
    assert!(matches!(ged.simulate(&[0.9]), Err(DistError::InvalidGedShape { .. })));
}

#[test]
// Purpose
// -------
// Simulated draws and quantiles agree: the empirical CDF at a few
// quantiles matches the nominal probability.
//
// Given
// -----
// - 100_000 skew-t(6, -0.4) draws and quantiles at 0.1, 0.5, 0.9.
//
// Expect
// ------
// - Empirical frequencies within 0.01 of nominal.
fn simulated_draws_match_quantiles() {
    let params = [6.0, -0.4];
    let mut dist = Distribution::skew_student(DistOptions::seeded(31));
    let draws = dist.simulate(&params).unwrap().draw(100_000);
    let probs = array![0.1, 0.5, 0.9];
    let q = dist.ppf(&params, probs.view()).unwrap();
    for (p, threshold) in probs.iter().zip(q.iter()) {
        let freq = draws.iter().filter(|&&v| v <= *threshold).count() as f64 / draws.len() as f64;
        assert!((freq - p).abs() < 0.01, "p = {p}: empirical {freq}");
    }
}

#[test]
// Purpose
// -------
// The canonical invalid shape vectors are rejected by `simulate`, including
// a vector that violates both skew-t restrictions at once.
//
// Given
// -----
// - t(1.5); skew-t (1.5, 0), (4, 1.5), (4, -1.5) and (1.5, 1.5).
//
// Expect
// ------
// - Degrees-of-freedom errors for eta / nu = 1.5 (checked before lambda),
//   skewness errors on the matching side otherwise.
fn simulate_rejects_canonical_invalid_shapes() {
    let opts = DistOptions::seeded(2);
    let mut t = Distribution::students_t(opts);
    let mut skew = Distribution::skew_student(opts);

    assert!(matches!(
        t.simulate(&[1.5]),
        Err(DistError::InvalidDegreesOfFreedom { value, .. }) if value == 1.5
    ));
    assert!(matches!(
        skew.simulate(&[1.5, 0.0]),
        Err(DistError::InvalidDegreesOfFreedom { value, .. }) if value == 1.5
    ));
    assert!(matches!(
        skew.simulate(&[4.0, 1.5]),
        Err(DistError::SkewnessTooLarge { value }) if value == 1.5
    ));
    assert!(matches!(
        skew.simulate(&[4.0, -1.5]),
        Err(DistError::SkewnessTooSmall { value }) if value == -1.5
    ));
    assert!(matches!(
        skew.simulate(&[1.5, 1.5]),
        Err(DistError::InvalidDegreesOfFreedom { value, .. }) if value == 1.5
    ));
}

#[test]
// Purpose
// -------
// Log-likelihood evaluation is a pure function of its inputs.
//
// Given
// -----
// - The seeded sample and one admissible vector per family, each evaluated
//   twice, with a simulation in between advancing the RNG.
//
// Expect
// ------
// - Bit-identical totals and per-observation arrays.
fn loglikelihood_is_idempotent() {
    let (resids, sigma2) = residual_sample(1000);
    let cases: [(Innovation, Vec<f64>); 4] = [
        (Innovation::Normal, vec![]),
        (Innovation::StudentsT, vec![6.5]),
        (Innovation::SkewStudent, vec![5.0, -0.25]),
        (Innovation::GeneralizedError, vec![1.3]),
    ];
    for (family, params) in cases {
        let mut dist = Distribution::new(family, DistOptions::seeded(8));
        let first = dist.loglikelihood(&params, resids.view(), sigma2.view());
        let first_individual = dist.loglikelihood_individual(&params, resids.view(), sigma2.view());
        let _ = dist.simulate(&params).unwrap().draw(10);
        let second = dist.loglikelihood(&params, resids.view(), sigma2.view());
        let second_individual =
            dist.loglikelihood_individual(&params, resids.view(), sigma2.view());

        assert_eq!(first.to_bits(), second.to_bits(), "{family}");
        assert_eq!(first_individual, second_individual, "{family}");
    }
}

#[test]
// Purpose
// -------
// The GED CDF is total through the public surface: the median and
// residuals far in the tails return probabilities instead of failing.
//
// Given
// -----
// - GED(1.5) at x = 0 and GED(3) at x = ±1e150.
//
// Expect
// ------
// - 0.5 at the median, 1 and 0 in the far tails.
fn ged_cdf_is_total_on_the_real_line() {
    let dist = Distribution::generalized_error(DistOptions::seeded(4));
    let median = dist.cdf(&[1.5], array![0.0].view()).unwrap();
    assert_eq!(median, array![0.5]);
    let tails = dist.cdf(&[3.0], array![1e150, -1e150].view()).unwrap();
    assert_eq!(tails, array![1.0, 0.0]);
}
