// In: src/error.rs

//! This module defines the single, unified error type for the entire rowperm library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RowpermError {
    // =========================================================================
    // === High-Level, Semantic Errors (Specific to our library's logic)
    // =========================================================================
    /// Two arrays that must describe the same `n` rows have different lengths.
    #[error("Length mismatch: expected {expected} rows, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// An array offered as a permutation is not a bijection over `[0, n)`.
    #[error("Invalid permutation: {0}")]
    InvalidPermutation(String),

    #[error("Unsupported data type for this operation: {0}")]
    UnsupportedType(String),

    #[error("Internal logic error (this is a bug): {0}")]
    InternalError(String),

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error originating from the Arrow library.
    #[error("Arrow operation failed: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// An error from the Serde JSON library, typically when loading a saved permutation.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// An error from a safe byte-casting operation failing.
    #[error("Byte slice casting error: {0}")]
    PodCast(String), // Manual `From` impl is needed as bytemuck::PodCastError doesn't impl Error

    // =========================================================================
    // === Low-Level Buffer Errors
    // =========================================================================
    #[error("Buffer length mismatch: got {0} bytes, expected a multiple of {1}")]
    BufferMismatch(usize, usize),
}

/// Shorthand used by every fallible operation in the crate.
pub type Result<T> = std::result::Result<T, RowpermError>;

impl RowpermError {
    /// Checks that `actual` equals `expected`, the precondition shared by every mapper.
    pub(crate) fn check_len(expected: usize, actual: usize) -> Result<()> {
        if expected != actual {
            return Err(RowpermError::LengthMismatch { expected, actual });
        }
        Ok(())
    }
}

// =============================================================================
// === Manual `From` Implementations ===
// =============================================================================

impl From<bytemuck::PodCastError> for RowpermError {
    fn from(err: bytemuck::PodCastError) -> Self {
        RowpermError::PodCast(err.to_string())
    }
}

#[cfg(feature = "python")]
impl From<RowpermError> for pyo3::PyErr {
    fn from(err: RowpermError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_len() {
        assert!(RowpermError::check_len(4, 4).is_ok());
        let err = RowpermError::check_len(4, 3).unwrap_err();
        assert!(matches!(
            err,
            RowpermError::LengthMismatch {
                expected: 4,
                actual: 3
            }
        ));
        assert_eq!(err.to_string(), "Length mismatch: expected 4 rows, got 3");
    }
}
