//! The generation reconciler.
//!
//! A vector `R` was computed while the dataset had physical order `old`. The
//! dataset has since been re-materialized with physical order `new` (same
//! logical rows, possibly a different layout). `update_permutation` derives a
//! single permutation `Q` such that
//!
//! ```text
//! permute_vector(Q, R) == permute_vector(new, unpermute_vector(old, R))
//! ```
//!
//! without ever materializing the logical-order vector. Both inputs must
//! describe the same logical dataset; that cannot be checked here.

use std::borrow::Cow;

use crate::error::{Result, RowpermError};
use crate::kernels::out_of_range;
use crate::kernels::reorder::permute_vector;
use crate::log_metric;
use crate::permutation::{CopyMode, Permutation, PermutationSource};

/// Outcome of reconciling two generations of a permutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// Both generations are identical; vectors from the old one are still valid.
    Unchanged,
    /// Forward-map old-physical vectors with this permutation to reach the new order.
    Reorder(Permutation),
}

impl Reconciliation {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Reconciliation::Unchanged)
    }

    /// The bridging permutation, or `None` for the no-op.
    pub fn into_permutation(self) -> Option<Permutation> {
        match self {
            Reconciliation::Unchanged => None,
            Reconciliation::Reorder(permutation) => Some(permutation),
        }
    }
}

/// Derives the permutation that moves an old-physical vector into new-physical order.
///
/// For every logical row `i`, the row stored at `old[i]` must land at `new[i]`,
/// so `Q[old[i]] = new[i]`. One pass, O(n).
pub fn update_permutation<N, O>(
    new_permutation: &N,
    old_permutation: &O,
) -> Result<Reconciliation>
where
    N: PermutationSource + ?Sized,
    O: PermutationSource + ?Sized,
{
    let new_p = new_permutation.permutation(CopyMode::View);
    let old_p = old_permutation.permutation(CopyMode::View);
    RowpermError::check_len(old_p.len(), new_p.len())?;

    if new_p == old_p {
        log_metric!(
            "event" = "update_permutation",
            "outcome" = "unchanged",
            "n" = new_p.len()
        );
        return Ok(Reconciliation::Unchanged);
    }

    let n = old_p.len();
    let mut bridge = old_p.to_vec();
    for (&old_pos, &new_pos) in old_p.iter().zip(new_p.iter()) {
        if new_pos as usize >= n {
            return Err(out_of_range(new_pos, n));
        }
        let slot = bridge
            .get_mut(old_pos as usize)
            .ok_or_else(|| out_of_range(old_pos, n))?;
        *slot = new_pos;
    }

    log_metric!(
        "event" = "update_permutation",
        "outcome" = "reorder",
        "n" = n
    );
    Ok(Reconciliation::Reorder(Permutation::new_unchecked(bridge)))
}

/// Moves `values`, computed under `old_permutation`, into `new_permutation`'s
/// physical order. Returns the input borrowed when nothing needs to move.
pub fn reconcile_vector<'a, N, O, T>(
    new_permutation: &N,
    old_permutation: &O,
    values: &'a [T],
) -> Result<Cow<'a, [T]>>
where
    N: PermutationSource + ?Sized,
    O: PermutationSource + ?Sized,
    T: Clone,
{
    RowpermError::check_len(old_permutation.number_of_rows(), values.len())?;
    match update_permutation(new_permutation, old_permutation)? {
        Reconciliation::Unchanged => Ok(Cow::Borrowed(values)),
        Reconciliation::Reorder(bridge) => Ok(Cow::Owned(permute_vector(&bridge, values)?)),
    }
}

//==================================================================================
// Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::reorder::unpermute_vector;
    use crate::permutation::validate;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_identical_generations_are_unchanged() {
        let mut rng = StdRng::seed_from_u64(11);
        for n in [0u32, 1, 5, 64] {
            let p = Permutation::shuffled(n, &mut rng);
            let result = update_permutation(&p, &p).unwrap();
            assert!(result.is_unchanged());
            assert_eq!(result.into_permutation(), None);
        }
    }

    #[test]
    fn test_concrete_swap_scenario() {
        let old_p = Permutation::identity(4);
        let new_p = Permutation::new(vec![1, 0, 2, 3]).unwrap();

        let bridge = update_permutation(&new_p, &old_p)
            .unwrap()
            .into_permutation()
            .unwrap();
        assert_eq!(bridge.as_slice(), &[1, 0, 2, 3]);

        let moved = permute_vector(&bridge, &["A", "B", "C", "D"]).unwrap();
        assert_eq!(moved, vec!["B", "A", "C", "D"]);
        assert_eq!(moved, permute_vector(&new_p, &["A", "B", "C", "D"]).unwrap());
    }

    #[test]
    fn test_non_involutive_scenario() {
        // A 3-cycle tells the two possible directions of Q apart.
        let old_p = Permutation::identity(3);
        let new_p = Permutation::new(vec![1, 2, 0]).unwrap();

        let bridge = update_permutation(&new_p, &old_p)
            .unwrap()
            .into_permutation()
            .unwrap();
        assert_eq!(bridge.as_slice(), &[1, 2, 0]);

        let old_physical = vec!["A", "B", "C"];
        assert_eq!(
            permute_vector(&bridge, &old_physical).unwrap(),
            vec!["C", "A", "B"]
        );
    }

    #[test]
    fn test_composition_law_on_random_generations() {
        let mut rng = StdRng::seed_from_u64(1234);
        for n in [1u32, 2, 3, 8, 100, 333] {
            for _ in 0..5 {
                let old_p = Permutation::shuffled(n, &mut rng);
                let new_p = Permutation::shuffled(n, &mut rng);
                let r: Vec<i64> = (0..n).map(|_| rng.random_range(-1000..1000)).collect();

                let via_logical =
                    permute_vector(&new_p, &unpermute_vector(&old_p, &r).unwrap()).unwrap();

                let direct = match update_permutation(&new_p, &old_p).unwrap() {
                    Reconciliation::Unchanged => r.clone(),
                    Reconciliation::Reorder(q) => {
                        assert!(validate(q.as_slice()).is_ok());
                        permute_vector(&q, &r).unwrap()
                    }
                };
                assert_eq!(direct, via_logical);
            }
        }
    }

    #[test]
    fn test_length_mismatch() {
        let a = Permutation::identity(3);
        let b = Permutation::identity(4);
        assert!(matches!(
            update_permutation(&a, &b),
            Err(RowpermError::LengthMismatch {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_out_of_range_generation_errors() {
        let old_p: Vec<u32> = vec![0, 1, 2];
        let new_p: Vec<u32> = vec![0, 7, 1];
        assert!(matches!(
            update_permutation(&new_p, &old_p),
            Err(RowpermError::InvalidPermutation(_))
        ));
    }

    #[test]
    fn test_reconcile_vector_borrows_on_noop() {
        let p = Permutation::new(vec![2, 0, 1]).unwrap();
        let values = vec![1.0, 2.0, 3.0];
        let same = reconcile_vector(&p, &p, &values).unwrap();
        assert!(matches!(same, Cow::Borrowed(_)));

        let old_p = Permutation::identity(3);
        let moved = reconcile_vector(&p, &old_p, &values).unwrap();
        assert!(matches!(moved, Cow::Owned(_)));
        assert_eq!(moved.as_ref(), &[2.0, 3.0, 1.0]);

        assert!(matches!(
            reconcile_vector(&p, &old_p, &[1.0]),
            Err(RowpermError::LengthMismatch { .. })
        ));
    }
}
