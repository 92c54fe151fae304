//! This module contains the pure, stateless kernels that move per-row data
//! between logical and physical row order.
//!
//! Every kernel borrows its inputs, allocates its own output, and requests
//! only a `CopyMode::View` of the permutation it is given.

pub mod reconcile;
pub mod reorder;
pub mod rows;

use crate::error::{Result, RowpermError};

/// Which way a vector crosses the permutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Logical order to physical order (`W[P[i]] = V[i]`).
    Forward,
    /// Physical order to logical order (`V[i] = W[P[i]]`).
    Backward,
}

/// Gather indices for a forward mapping: `inverse[P[i]] = i`.
///
/// Used where a kernel can only gather (Arrow `take`, ndarray `select`).
/// Out-of-range entries are reported; repeats are not detected.
pub(crate) fn inverse_indices(permutation: &[u32]) -> Result<Vec<u32>> {
    let mut inverse = vec![0u32; permutation.len()];
    for (logical, &physical) in permutation.iter().enumerate() {
        let slot = inverse
            .get_mut(physical as usize)
            .ok_or_else(|| out_of_range(physical, permutation.len()))?;
        *slot = logical as u32;
    }
    Ok(inverse)
}

pub(crate) fn out_of_range(physical: u32, n: usize) -> RowpermError {
    RowpermError::InvalidPermutation(format!(
        "physical position {} is out of range for {} rows",
        physical, n
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_indices() {
        assert_eq!(inverse_indices(&[2, 0, 3, 1]).unwrap(), vec![1, 3, 0, 2]);
        assert!(inverse_indices(&[]).unwrap().is_empty());
        assert!(matches!(
            inverse_indices(&[0, 2]),
            Err(RowpermError::InvalidPermutation(_))
        ));
    }
}
