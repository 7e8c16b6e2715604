//! Numpy array conversion for simulation samples.

use numpy::PyArray1;
use pyo3::prelude::*;

/// Convert Vec<f64> to numpy array.
pub fn vec_to_numpy_f64<'py>(py: Python<'py>, vec: Vec<f64>) -> &'py PyArray1<f64> {
    PyArray1::from_vec(py, vec)
}
