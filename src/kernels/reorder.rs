//! The forward and backward mappers.
//!
//! `permute_vector` takes a logical vector to physical order and
//! `unpermute_vector` takes it back. They are exact inverses of each other.
//! The bijection itself is not re-validated here; only out-of-range entries
//! are caught, since they would otherwise index past the end.

use crate::error::{Result, RowpermError};
use crate::kernels::{out_of_range, Direction};
use crate::permutation::{CopyMode, PermutationSource};

/// Writes `output[P[i]] = values[i]` for every logical row `i`.
pub fn permute_vector_into<S, T>(permutation: &S, values: &[T], output: &mut [T]) -> Result<()>
where
    S: PermutationSource + ?Sized,
    T: Clone,
{
    let perm = permutation.permutation(CopyMode::View);
    RowpermError::check_len(perm.len(), values.len())?;
    RowpermError::check_len(perm.len(), output.len())?;

    for (value, &physical) in values.iter().zip(perm.iter()) {
        let slot = output
            .get_mut(physical as usize)
            .ok_or_else(|| out_of_range(physical, perm.len()))?;
        *slot = value.clone();
    }
    Ok(())
}

/// Writes `output[i] = values[P[i]]` for every logical row `i`.
pub fn unpermute_vector_into<S, T>(permutation: &S, values: &[T], output: &mut [T]) -> Result<()>
where
    S: PermutationSource + ?Sized,
    T: Clone,
{
    let perm = permutation.permutation(CopyMode::View);
    RowpermError::check_len(perm.len(), values.len())?;
    RowpermError::check_len(perm.len(), output.len())?;

    for (slot, &physical) in output.iter_mut().zip(perm.iter()) {
        *slot = values
            .get(physical as usize)
            .ok_or_else(|| out_of_range(physical, perm.len()))?
            .clone();
    }
    Ok(())
}

/// Reorders a logical-order vector into physical order, returning a fresh vector.
pub fn permute_vector<S, T>(permutation: &S, values: &[T]) -> Result<Vec<T>>
where
    S: PermutationSource + ?Sized,
    T: Clone,
{
    // Every slot is overwritten below; the copy only provides initialized storage.
    let mut output = values.to_vec();
    permute_vector_into(permutation, values, &mut output)?;
    log::trace!("permute_vector: reordered {} rows", output.len());
    Ok(output)
}

/// Reorders a physical-order vector back into logical order, returning a fresh vector.
pub fn unpermute_vector<S, T>(permutation: &S, values: &[T]) -> Result<Vec<T>>
where
    S: PermutationSource + ?Sized,
    T: Clone,
{
    let perm = permutation.permutation(CopyMode::View);
    RowpermError::check_len(perm.len(), values.len())?;

    let output = perm
        .iter()
        .map(|&physical| {
            values
                .get(physical as usize)
                .cloned()
                .ok_or_else(|| out_of_range(physical, perm.len()))
        })
        .collect::<Result<Vec<T>>>()?;
    log::trace!("unpermute_vector: reordered {} rows", output.len());
    Ok(output)
}

/// Applies `permute_vector` or `unpermute_vector` depending on `direction`.
pub fn reorder_vector<S, T>(permutation: &S, values: &[T], direction: Direction) -> Result<Vec<T>>
where
    S: PermutationSource + ?Sized,
    T: Clone,
{
    match direction {
        Direction::Forward => permute_vector(permutation, values),
        Direction::Backward => unpermute_vector(permutation, values),
    }
}
