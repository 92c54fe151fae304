// In: src/ffi/python.rs

//! pyo3 wrappers. Python-supplied permutations are foreign input and are
//! always validated before use.

use log::LevelFilter;
use pyo3::prelude::*;
use pyo3::types::PyBytes;

use crate::bridge;
use crate::kernels::reconcile::{update_permutation, Reconciliation};
use crate::kernels::reorder::{permute_vector, unpermute_vector};
use crate::kernels::Direction;
use crate::observability;
use crate::permutation::Permutation;
use crate::types::RowDataType;

//==================================================================================
// I. Vector Mappers
//==================================================================================

/// Reorders a logical-order list of floats into physical order.
#[pyfunction]
#[pyo3(name = "permute_vector")]
pub fn permute_vector_py(py: Python<'_>, permutation: Vec<u32>, values: Vec<f64>) -> PyResult<Vec<f64>> {
    let permutation = Permutation::new(permutation)?;
    Ok(py.allow_threads(move || permute_vector(&permutation, &values))?)
}

/// Reorders a physical-order list of floats back into logical order.
#[pyfunction]
#[pyo3(name = "unpermute_vector")]
pub fn unpermute_vector_py(
    py: Python<'_>,
    permutation: Vec<u32>,
    values: Vec<f64>,
) -> PyResult<Vec<f64>> {
    let permutation = Permutation::new(permutation)?;
    Ok(py.allow_threads(move || unpermute_vector(&permutation, &values))?)
}

/// Returns the bridging permutation, or `None` when both generations are identical.
#[pyfunction]
#[pyo3(name = "update_permutation")]
pub fn update_permutation_py(
    new_permutation: Vec<u32>,
    old_permutation: Vec<u32>,
) -> PyResult<Option<Vec<u32>>> {
    let new_permutation = Permutation::new(new_permutation)?;
    let old_permutation = Permutation::new(old_permutation)?;
    match update_permutation(&new_permutation, &old_permutation)? {
        Reconciliation::Unchanged => Ok(None),
        Reconciliation::Reorder(bridge) => Ok(Some(bridge.into_vec())),
    }
}

//==================================================================================
// II. Raw Buffers
//==================================================================================

/// Reorders a raw little-endian buffer of `dtype` elements (e.g. "float64").
#[pyfunction]
#[pyo3(name = "permute_buffer", signature = (permutation, data, dtype, forward = true))]
pub fn permute_buffer_py<'py>(
    py: Python<'py>,
    permutation: Vec<u32>,
    data: &[u8],
    dtype: &str,
    forward: bool,
) -> PyResult<Bound<'py, PyBytes>> {
    let dtype: RowDataType = dtype.parse()?;
    let direction = if forward {
        Direction::Forward
    } else {
        Direction::Backward
    };
    let permutation = Permutation::new(permutation)?;
    let out = bridge::permute_buffer(&permutation, data, dtype, direction)?;
    Ok(PyBytes::new_bound(py, &out))
}

//==================================================================================
// III. Logging
//==================================================================================

#[pyfunction]
#[pyo3(name = "enable_verbose_logging", signature = (log_file = None))]
pub fn enable_verbose_logging_py(log_file: Option<String>) -> PyResult<()> {
    observability::enable_verbose_logging(LevelFilter::Debug, log_file.as_deref())?;
    Ok(())
}
