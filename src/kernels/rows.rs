//! Row-block mappers for 2-D per-row results (axis 0 is rows), such as a
//! per-gene statistic computed for several groups at once.

use ndarray::{Array2, ArrayView2, Axis};

use crate::error::{Result, RowpermError};
use crate::kernels::{inverse_indices, out_of_range};
use crate::permutation::{CopyMode, PermutationSource};

/// Moves every row of a logical-order block to its physical position.
pub fn permute_rows<S, T>(permutation: &S, rows: ArrayView2<'_, T>) -> Result<Array2<T>>
where
    S: PermutationSource + ?Sized,
    T: Clone,
{
    let perm = permutation.permutation(CopyMode::View);
    RowpermError::check_len(perm.len(), rows.nrows())?;

    let gather: Vec<usize> = inverse_indices(&perm)?
        .into_iter()
        .map(|logical| logical as usize)
        .collect();
    Ok(rows.select(Axis(0), &gather))
}

/// Moves every row of a physical-order block back to its logical position.
pub fn unpermute_rows<S, T>(permutation: &S, rows: ArrayView2<'_, T>) -> Result<Array2<T>>
where
    S: PermutationSource + ?Sized,
    T: Clone,
{
    let perm = permutation.permutation(CopyMode::View);
    let n = rows.nrows();
    RowpermError::check_len(perm.len(), n)?;

    let gather = perm
        .iter()
        .map(|&physical| {
            if (physical as usize) < n {
                Ok(physical as usize)
            } else {
                Err(out_of_range(physical, n))
            }
        })
        .collect::<Result<Vec<usize>>>()?;
    Ok(rows.select(Axis(0), &gather))
}
