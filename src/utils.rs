//! utils — PyO3 helpers for turning Python array-likes into `ndarray` data.
//!
//! Everything here is compiled only with the `python-bindings` feature.
#[cfg(feature = "python-bindings")]
use ndarray::Array1;

#[cfg(feature = "python-bindings")]
use numpy::PyReadonlyArray1;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, prelude::*, types::PyAny};

/// Copy a 1-D `float64` NumPy array, pandas Series, or float sequence into
/// an owned `Array1<f64>`.
///
/// NumPy arrays are read through a borrowed view (strided views included);
/// anything else is extracted element by element as a sequence.
///
/// # Errors
/// `TypeError` naming `name` if the object is neither.
#[cfg(feature = "python-bindings")]
pub fn extract_array1(raw_data: &Bound<'_, PyAny>, name: &str) -> PyResult<Array1<f64>> {
    if let Ok(arr) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        return Ok(arr.as_array().to_owned());
    }
    let values: Vec<f64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err(format!(
            "{name} must be a 1-D numpy.ndarray, pandas.Series, or sequence of float64"
        ))
    })?;
    Ok(Array1::from(values))
}

/// Copy a Python array-like into a parameter vector.
#[cfg(feature = "python-bindings")]
pub fn extract_params(raw_params: &Bound<'_, PyAny>) -> PyResult<Vec<f64>> {
    Ok(extract_array1(raw_params, "params")?.to_vec())
}
