//! This file is the root of the `rowperm` Rust crate.
//!
//! `rowperm` manages the row permutation between the logical row order a
//! caller knows and the physical order a sparse-matrix storage engine keeps:
//!
//! ```text
//! permutation   -> the `Permutation` entity and the `PermutationSource` interface
//! kernels       -> forward/backward mappers and the generation reconciler
//! bridge        -> the same mappers over raw engine buffers and Arrow arrays
//! ```
//!
//! # Example
//!
//! ```
//! use rowperm::{permute_vector, unpermute_vector, Permutation};
//!
//! let p = Permutation::new(vec![2, 0, 3, 1]).unwrap();
//! let physical = permute_vector(&p, &[10, 20, 30, 40]).unwrap();
//! assert_eq!(physical, vec![20, 40, 10, 30]);
//! assert_eq!(unpermute_vector(&p, &physical).unwrap(), vec![10, 20, 30, 40]);
//! ```

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
//==================================================================================
// 1. Module Declarations
//==================================================================================
pub mod bridge;
pub mod config;
pub mod error;
pub mod kernels;
pub mod observability;
pub mod permutation;
pub mod types;

mod ffi;
mod utils;

//==================================================================================
// 2. Public API Re-exports
//==================================================================================
pub use config::{RowpermConfig, ValidationPolicy};
pub use error::{Result, RowpermError};
pub use kernels::reconcile::{reconcile_vector, update_permutation, Reconciliation};
pub use kernels::reorder::{
    permute_vector, permute_vector_into, reorder_vector, unpermute_vector, unpermute_vector_into,
};
pub use kernels::rows::{permute_rows, unpermute_rows};
pub use kernels::Direction;
pub use permutation::{CopyMode, Permutation, PermutationSource};
pub use types::RowDataType;

//==================================================================================
// 3. Python Module Definition
//==================================================================================
#[cfg(feature = "python")]
use pyo3::prelude::*;

/// The `rowperm` Python module, containing all exposed Rust functions.
#[cfg(feature = "python")]
#[pymodule]
fn rowperm(m: &Bound<'_, PyModule>) -> PyResult<()> {
    use ffi::python;

    m.add_function(wrap_pyfunction!(python::permute_vector_py, m)?)?;
    m.add_function(wrap_pyfunction!(python::unpermute_vector_py, m)?)?;
    m.add_function(wrap_pyfunction!(python::update_permutation_py, m)?)?;
    m.add_function(wrap_pyfunction!(python::permute_buffer_py, m)?)?;
    m.add_function(wrap_pyfunction!(python::enable_verbose_logging_py, m)?)?;

    // --- Expose version string as a module attribute ---
    m.add("__version__", VERSION)?;

    Ok(())
}
