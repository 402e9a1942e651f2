//! rust_volatility — innovation distributions for volatility models, with
//! optional Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and, with the `python-bindings`
//! feature, as the PyO3 bridge exposing the distribution layer to Python via
//! the `_rust_volatility` extension module.
//!
//! Key behaviors
//! -------------
//! - Re-export the [`volatility`] module as the public crate surface.
//! - Define a `#[pyclass]` wrapper for [`volatility::Distribution`] and the
//!   `#[pymodule]` initializer that registers it under
//!   `rust_volatility.distributions`.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in [`volatility`]; this file only converts
//!   arguments, dispatches, and maps errors.
//! - Errors are carried as [`volatility::DistError`] internally and become
//!   Python `ValueError`s at the boundary.
//!
//! Downstream usage
//! ----------------
//! - Rust code should depend on [`volatility`] (or its `prelude`) and can
//!   ignore the items guarded by `python-bindings`.
//! - The Python package imports `_rust_volatility.distributions.Distribution`
//!   and may wrap it in a thin pure-Python facade.

pub mod utils;
pub mod volatility;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1, PyArray2};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    utils::{extract_array1, extract_params},
    volatility::{DistOptions, Distribution, Innovation},
};

/// Distribution — Python-facing wrapper for an innovation distribution.
///
/// Purpose
/// -------
/// Expose [`Distribution`] to Python callers: log-likelihood, bounds,
/// constraints, starting values, simulation, CDF and quantiles.
///
/// Parameters
/// ----------
/// Constructed through static factories, each taking an optional `seed`:
/// - `Distribution.normal(seed=None)`
/// - `Distribution.students_t(seed=None)`
/// - `Distribution.skew_student(seed=None)`
/// - `Distribution.generalized_error(seed=None)`
///
/// Fields
/// ------
/// - `inner`: [`Distribution`]
///   The Rust distribution, including its random source.
///
/// Notes
/// -----
/// - Array arguments accept NumPy arrays, pandas Series, or float sequences.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "Distribution", module = "rust_volatility.distributions")]
pub struct PyDistribution {
    inner: Distribution,
}

#[cfg(feature = "python-bindings")]
impl PyDistribution {
    fn build(innovation: Innovation, seed: Option<u64>) -> PyDistribution {
        let options = DistOptions { seed, ..DistOptions::default() };
        PyDistribution { inner: Distribution::new(innovation, options) }
    }
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyDistribution {
    #[staticmethod]
    #[pyo3(signature = (seed = None), text_signature = "(seed=None)")]
    pub fn normal(seed: Option<u64>) -> Self {
        Self::build(Innovation::Normal, seed)
    }

    #[staticmethod]
    #[pyo3(signature = (seed = None), text_signature = "(seed=None)")]
    pub fn students_t(seed: Option<u64>) -> Self {
        Self::build(Innovation::StudentsT, seed)
    }

    #[staticmethod]
    #[pyo3(signature = (seed = None), text_signature = "(seed=None)")]
    pub fn skew_student(seed: Option<u64>) -> Self {
        Self::build(Innovation::SkewStudent, seed)
    }

    #[staticmethod]
    #[pyo3(signature = (seed = None), text_signature = "(seed=None)")]
    pub fn generalized_error(seed: Option<u64>) -> Self {
        Self::build(Innovation::GeneralizedError, seed)
    }

    /// Distribution name.
    #[getter]
    pub fn name(&self) -> &'static str {
        self.inner.name()
    }

    /// Number of shape parameters.
    #[getter]
    pub fn num_params(&self) -> usize {
        self.inner.num_params()
    }

    /// Shape parameter names in order.
    #[getter]
    pub fn parameter_names(&self) -> Vec<&'static str> {
        self.inner.parameter_names().to_vec()
    }

    /// Log-likelihood of `resids` given `sigma2`; per observation when
    /// `individual=True`.
    ///
    /// Length mismatches raise `ValueError` here instead of panicking.
    #[pyo3(
        signature = (params, resids, sigma2, individual = false),
        text_signature = "(self, params, resids, sigma2, /, individual=False)"
    )]
    pub fn loglikelihood<'py>(
        &self, py: Python<'py>, params: &Bound<'py, PyAny>, resids: &Bound<'py, PyAny>,
        sigma2: &Bound<'py, PyAny>, individual: bool,
    ) -> PyResult<PyObject> {
        let params = extract_params(params)?;
        let resids = extract_array1(resids, "resids")?;
        let sigma2 = extract_array1(sigma2, "sigma2")?;
        if params.len() != self.inner.num_params() {
            return Err(pyo3::exceptions::PyValueError::new_err(format!(
                "{} expects {} parameters, got {}",
                self.inner.name(),
                self.inner.num_params(),
                params.len()
            )));
        }
        if resids.len() != sigma2.len() {
            return Err(pyo3::exceptions::PyValueError::new_err(
                "resids and sigma2 must have equal length",
            ));
        }
        if individual {
            let lls = self.inner.loglikelihood_individual(&params, resids.view(), sigma2.view());
            Ok(lls.into_pyarray(py).into_any().unbind())
        } else {
            let ll = self.inner.loglikelihood(&params, resids.view(), sigma2.view());
            Ok(ll.into_pyobject(py)?.into_any().unbind())
        }
    }

    /// `(lower, upper)` bounds per shape parameter.
    #[pyo3(text_signature = "(self, resids)")]
    pub fn bounds(&self, resids: &Bound<'_, PyAny>) -> PyResult<Vec<(f64, f64)>> {
        let resids = extract_array1(resids, "resids")?;
        Ok(self.inner.bounds(resids.view()).iter().map(|b| b.as_tuple()).collect())
    }

    /// `(A, b)` with `A @ params >= b`.
    pub fn constraints<'py>(
        &self, py: Python<'py>,
    ) -> (Bound<'py, PyArray2<f64>>, Bound<'py, PyArray1<f64>>) {
        let cons = self.inner.constraints();
        (cons.a.into_pyarray(py), cons.b.into_pyarray(py))
    }

    /// Starting values for maximum-likelihood estimation.
    #[pyo3(text_signature = "(self, resids)")]
    pub fn starting_values<'py>(
        &self, py: Python<'py>, resids: &Bound<'py, PyAny>,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let resids = extract_array1(resids, "resids")?;
        Ok(self.inner.starting_values(resids.view()).into_pyarray(py))
    }

    /// `n` standardized draws with shape parameters `params`.
    #[pyo3(text_signature = "(self, params, n)")]
    pub fn simulate<'py>(
        &mut self, py: Python<'py>, params: &Bound<'py, PyAny>, n: usize,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let params = extract_params(params)?;
        let draws = self.inner.simulate(&params)?.draw(n);
        Ok(draws.into_pyarray(py))
    }

    /// Standardized CDF at `x`.
    #[pyo3(text_signature = "(self, params, x)")]
    pub fn cdf<'py>(
        &self, py: Python<'py>, params: &Bound<'py, PyAny>, x: &Bound<'py, PyAny>,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let params = extract_params(params)?;
        let x = extract_array1(x, "x")?;
        Ok(self.inner.cdf(&params, x.view())?.into_pyarray(py))
    }

    /// Standardized quantiles at `pits`.
    #[pyo3(text_signature = "(self, params, pits)")]
    pub fn ppf<'py>(
        &self, py: Python<'py>, params: &Bound<'py, PyAny>, pits: &Bound<'py, PyAny>,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let params = extract_params(params)?;
        let pits = extract_array1(pits, "pits")?;
        Ok(self.inner.ppf(&params, pits.view())?.into_pyarray(py))
    }

    /// Reseed the random source.
    pub fn reseed(&mut self, seed: u64) {
        self.inner.reseed(seed);
    }

    fn __repr__(&self) -> String {
        format!("Distribution({})", self.inner)
    }
}

/// Python module initializer for `_rust_volatility`.
///
/// Registers the `distributions` submodule and inserts it into
/// `sys.modules` so `rust_volatility.distributions` imports with dot
/// notation.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_volatility<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let distributions_mod = PyModule::new(_py, "distributions")?;
    distributions(_py, m, &distributions_mod)?;

    _py.import("sys")?
        .getattr("modules")?
        .set_item("rust_volatility.distributions", distributions_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn distributions<'py>(
    _py: Python, rust_volatility: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<PyDistribution>()?;
    rust_volatility.add_submodule(m)?;
    Ok(())
}
