//! Distribution — one innovation family bundled with its options and random
//! source.
//!
//! Purpose
//! -------
//! Present the full innovation-distribution contract through one value:
//! log-likelihood (aggregate and per observation), bounds, constraints,
//! starting values, standardized CDF / quantile, and simulation.
//!
//! Key behaviors
//! -------------
//! - Stateless operations forward to [`Innovation`] with the configured
//!   [`BoundsConfig`](crate::volatility::core::options::BoundsConfig).
//! - [`Distribution::simulate`] validates parameters once, builds the family
//!   sampler once, and hands back a [`Simulator`] that borrows the
//!   distribution's RNG. Repeated [`Simulator::draw`] calls advance that RNG,
//!   so successive batches differ while the whole stream stays reproducible
//!   from the seed.
//!
//! Invariants & assumptions
//! ------------------------
//! - Parameters are never stored on the distribution; every call receives
//!   them explicitly.
//! - At most one [`Simulator`] per distribution is alive at a time (it holds
//!   `&mut StdRng`).
//!
//! Downstream usage
//! ----------------
//! - Volatility-model drivers call `loglikelihood` inside their objective and
//!   `simulate(..)?.draw(n)` inside forecasting / bootstrap loops.
//!
//! Testing notes
//! -------------
//! - Unit tests cover seeding, reproducibility, simulation moments per
//!   family, and the validation errors of `simulate`.
use crate::volatility::{
    core::{
        constraints::{LinearConstraints, ParamBound},
        family::Innovation,
        options::DistOptions,
        params::ShapeParams,
    },
    errors::DistResult,
    models::{
        InnovationSampler, generalized_error::GedSampler, normal::NormalSampler,
        skew_student::SkewStudentSampler, students_t::StudentsTSampler,
    },
};
use ndarray::{Array1, ArrayView1};
use rand::{SeedableRng, rngs::StdRng};
use std::fmt;

/// Distribution — an innovation family with options and an owned RNG.
///
/// Fields
/// ------
/// - `innovation`: the family tag.
/// - `options`: seed and bounds configuration.
/// - `rng`: random source used only by [`Simulator`].
#[derive(Debug, Clone)]
pub struct Distribution {
    innovation: Innovation,
    options: DistOptions,
    rng: StdRng,
}

impl Distribution {
    /// Construct a distribution for `innovation` with `options`.
    ///
    /// `options.seed = Some(s)` seeds the RNG deterministically; `None` draws
    /// a seed from operating-system entropy.
    pub fn new(innovation: Innovation, options: DistOptions) -> Distribution {
        let rng = match options.seed {
            Some(seed) => {
                log::debug!("{innovation}: seeding RNG with {seed}");
                StdRng::seed_from_u64(seed)
            }
            None => {
                log::debug!("{innovation}: seeding RNG from OS entropy");
                StdRng::from_os_rng()
            }
        };
        Distribution { innovation, options, rng }
    }

    /// Normal innovations.
    pub fn normal(options: DistOptions) -> Distribution {
        Distribution::new(Innovation::Normal, options)
    }

    /// Unit-variance Student's t innovations.
    pub fn students_t(options: DistOptions) -> Distribution {
        Distribution::new(Innovation::StudentsT, options)
    }

    /// Hansen's skewed Student's t innovations.
    pub fn skew_student(options: DistOptions) -> Distribution {
        Distribution::new(Innovation::SkewStudent, options)
    }

    /// Generalized Error Distribution innovations.
    pub fn generalized_error(options: DistOptions) -> Distribution {
        Distribution::new(Innovation::GeneralizedError, options)
    }

    pub fn innovation(&self) -> Innovation {
        self.innovation
    }

    pub fn options(&self) -> &DistOptions {
        &self.options
    }

    pub fn name(&self) -> &'static str {
        self.innovation.name()
    }

    pub fn num_params(&self) -> usize {
        self.innovation.num_params()
    }

    pub fn parameter_names(&self) -> &'static [&'static str] {
        self.innovation.parameter_names()
    }

    /// Total log-likelihood of `resids` given conditional variances `sigma2`.
    ///
    /// # Panics
    /// Panics on a parameter-count or series-length mismatch.
    pub fn loglikelihood(
        &self, params: &[f64], resids: ArrayView1<'_, f64>, sigma2: ArrayView1<'_, f64>,
    ) -> f64 {
        self.innovation.loglikelihood(params, resids, sigma2)
    }

    /// Per-observation log-likelihood contributions.
    ///
    /// # Panics
    /// Panics on a parameter-count or series-length mismatch.
    pub fn loglikelihood_individual(
        &self, params: &[f64], resids: ArrayView1<'_, f64>, sigma2: ArrayView1<'_, f64>,
    ) -> Array1<f64> {
        self.innovation.loglikelihood_individual(params, resids, sigma2)
    }

    /// Box bounds for the shape parameters, one per parameter.
    pub fn bounds(&self, resids: ArrayView1<'_, f64>) -> Vec<ParamBound> {
        self.innovation.bounds(resids, &self.options.bounds)
    }

    /// Linear constraint system `a · params ≥ b`.
    pub fn constraints(&self) -> LinearConstraints {
        self.innovation.constraints(&self.options.bounds)
    }

    /// Starting values for maximum-likelihood estimation.
    pub fn starting_values(&self, resids: ArrayView1<'_, f64>) -> Array1<f64> {
        self.innovation.starting_values(resids)
    }

    /// Standardized CDF at `x`.
    pub fn cdf(&self, params: &[f64], x: ArrayView1<'_, f64>) -> DistResult<Array1<f64>> {
        self.innovation.cdf(params, x)
    }

    /// Standardized quantiles at `pits`.
    pub fn ppf(&self, params: &[f64], pits: ArrayView1<'_, f64>) -> DistResult<Array1<f64>> {
        self.innovation.ppf(params, pits)
    }

    /// Validate `params` and return a reusable sampler.
    ///
    /// Parameters
    /// ----------
    /// - `params`: `&[f64]`
    ///   Shape parameters in `parameter_names()` order.
    ///
    /// Returns
    /// -------
    /// `DistResult<Simulator<'_>>`
    ///   A simulator borrowing this distribution's RNG; call
    ///   [`Simulator::draw`] as often as needed.
    ///
    /// Errors
    /// ------
    /// - Domain errors from [`Innovation::validate_params`]
    ///   (`InvalidDegreesOfFreedom`, `SkewnessTooLarge`, `SkewnessTooSmall`,
    ///   `InvalidGedShape`, `ParamLengthMismatch`).
    /// - `StatrsRejected` / `SamplerRejected` if a backend refuses the shape.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rust_volatility::volatility::prelude::*;
    /// let mut dist = Distribution::students_t(DistOptions::seeded(7));
    /// let draws = dist.simulate(&[8.0]).unwrap().draw(100);
    /// assert_eq!(draws.len(), 100);
    /// assert!(dist.simulate(&[2.0]).is_err());
    /// ```
    pub fn simulate(&mut self, params: &[f64]) -> DistResult<Simulator<'_>> {
        let shape = self.innovation.validate_params(params)?;
        let sampler = Sampler::new(shape)?;
        Ok(Simulator { sampler, params: shape, rng: &mut self.rng })
    }

    /// Replace the RNG with one seeded from `seed` and record the seed.
    pub fn reseed(&mut self, seed: u64) {
        log::debug!("{}: reseeding RNG with {seed}", self.innovation);
        self.options.seed = Some(seed);
        self.rng = StdRng::seed_from_u64(seed);
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.innovation)
    }
}

/// Family sampler selected once per `simulate` call.
#[derive(Debug, Clone)]
enum Sampler {
    Normal(NormalSampler),
    StudentsT(StudentsTSampler),
    SkewStudent(SkewStudentSampler),
    GeneralizedError(GedSampler),
}

impl Sampler {
    fn new(shape: ShapeParams) -> DistResult<Sampler> {
        Ok(match shape {
            ShapeParams::Normal => Sampler::Normal(NormalSampler),
            ShapeParams::StudentsT { nu } => Sampler::StudentsT(StudentsTSampler::new(nu)?),
            ShapeParams::SkewStudent { eta, lambda } => {
                Sampler::SkewStudent(SkewStudentSampler::new(eta, lambda)?)
            }
            ShapeParams::GeneralizedError { nu } => {
                Sampler::GeneralizedError(GedSampler::new(nu)?)
            }
        })
    }

    fn fill(&self, rng: &mut StdRng, n: usize) -> Array1<f64> {
        match self {
            Sampler::Normal(s) => draw_n(s, rng, n),
            Sampler::StudentsT(s) => draw_n(s, rng, n),
            Sampler::SkewStudent(s) => draw_n(s, rng, n),
            Sampler::GeneralizedError(s) => draw_n(s, rng, n),
        }
    }
}

fn draw_n<S: InnovationSampler>(sampler: &S, rng: &mut StdRng, n: usize) -> Array1<f64> {
    Array1::from_shape_fn(n, |_| sampler.sample(rng))
}

/// Simulator — validated sampling procedure returned by
/// [`Distribution::simulate`].
#[derive(Debug)]
pub struct Simulator<'a> {
    sampler: Sampler,
    params: ShapeParams,
    rng: &'a mut StdRng,
}

impl Simulator<'_> {
    /// Draw `n` i.i.d. standardized innovations (mean 0, variance 1).
    ///
    /// `n = 0` returns an empty array.
    pub fn draw(&mut self, n: usize) -> Array1<f64> {
        self.sampler.fill(self.rng, n)
    }

    /// The validated parameters this simulator samples with.
    pub fn params(&self) -> ShapeParams {
        self.params
    }
}
