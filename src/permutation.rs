//! This module defines the `Permutation` entity: the canonical bijection between
//! the logical row order a caller knows and the physical row order a storage
//! engine keeps.
//!
//! `P[i]` is the physical storage position of the row whose logical index is `i`.
//!
//! It also defines the narrow `PermutationSource` interface through which the
//! storage engine hands its current permutation to the core.

use std::borrow::Cow;

use bitvec::prelude::*;
use num_traits::PrimInt;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::RowpermConfig;
use crate::error::{Result, RowpermError};
use crate::kernels::{inverse_indices, out_of_range};

//==================================================================================
// 1. Collaborator Interface
//==================================================================================

/// Ownership choice when asking a `PermutationSource` for its permutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMode {
    /// Borrow a read-only view. It may alias the source's internal storage.
    View,
    /// Take an independently owned copy that is safe to mutate.
    Owned,
}

/// Anything that can expose a row permutation: the storage engine's matrix
/// type, an owned `Permutation`, or a plain `u32` slice.
///
/// Every operation in this crate only ever asks for `CopyMode::View`.
pub trait PermutationSource {
    /// Number of rows in the dataset, `n`.
    fn number_of_rows(&self) -> usize;

    /// The dataset's current permutation. With `CopyMode::Owned` the result
    /// must be `Cow::Owned`.
    fn permutation(&self, mode: CopyMode) -> Cow<'_, [u32]>;
}

impl PermutationSource for [u32] {
    fn number_of_rows(&self) -> usize {
        self.len()
    }

    fn permutation(&self, mode: CopyMode) -> Cow<'_, [u32]> {
        match mode {
            CopyMode::View => Cow::Borrowed(self),
            CopyMode::Owned => Cow::Owned(self.to_vec()),
        }
    }
}

impl PermutationSource for Vec<u32> {
    fn number_of_rows(&self) -> usize {
        self.len()
    }

    fn permutation(&self, mode: CopyMode) -> Cow<'_, [u32]> {
        self.as_slice().permutation(mode)
    }
}

//==================================================================================
// 2. The Permutation Entity
//==================================================================================

/// A validated, immutable bijection over `[0, n)`.
///
/// Serializes as a plain integer sequence; deserialization always validates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct Permutation {
    indices: Vec<u32>,
}

/// Checks that `indices` is a bijection over `[0, indices.len())`.
///
/// With no out-of-range entries and no repeats, `n` entries cannot leave a gap.
pub fn validate(indices: &[u32]) -> Result<()> {
    let n = indices.len();
    let mut seen = bitvec![0; n];
    for (logical, &physical) in indices.iter().enumerate() {
        let physical = physical as usize;
        if physical >= n {
            return Err(RowpermError::InvalidPermutation(format!(
                "entry {} at logical row {} is out of range for {} rows",
                physical, logical, n
            )));
        }
        if seen.replace(physical, true) {
            return Err(RowpermError::InvalidPermutation(format!(
                "physical position {} appears more than once (again at logical row {})",
                physical, logical
            )));
        }
    }
    Ok(())
}

impl Permutation {
    /// Builds a permutation from an untrusted vector, validating the bijection.
    pub fn new(indices: Vec<u32>) -> Result<Self> {
        validate(&indices)?;
        Ok(Self { indices })
    }

    /// Builds a permutation without validation, for vectors straight from the
    /// trusted storage engine or produced by this crate's own algorithms.
    /// Methods that index through the result still report out-of-range entries.
    pub fn new_unchecked(indices: Vec<u32>) -> Self {
        Self { indices }
    }

    /// Converts a foreign integer buffer (e.g. `i32` from a JS or numpy side)
    /// into a validated permutation. Negative or oversized entries are rejected.
    pub fn try_from_indices<I: PrimInt>(values: &[I]) -> Result<Self> {
        let indices = values
            .iter()
            .enumerate()
            .map(|(logical, value)| {
                value.to_u32().ok_or_else(|| {
                    RowpermError::InvalidPermutation(format!(
                        "entry at logical row {} is not a valid row index",
                        logical
                    ))
                })
            })
            .collect::<Result<Vec<u32>>>()?;
        Self::new(indices)
    }

    /// Ingests an untrusted vector according to the configured validation policy.
    pub fn ingest(indices: Vec<u32>, config: &RowpermConfig) -> Result<Self> {
        if config.validation.requires_validation(false) {
            Self::new(indices)
        } else {
            Ok(Self::new_unchecked(indices))
        }
    }

    /// Takes an owned copy of a source's permutation, validating it only if the
    /// configuration says sources are not to be trusted.
    pub fn from_source<S>(source: &S, config: &RowpermConfig) -> Result<Self>
    where
        S: PermutationSource + ?Sized,
    {
        let indices = source.permutation(CopyMode::Owned).into_owned();
        RowpermError::check_len(source.number_of_rows(), indices.len())?;
        if config.validate_sources() {
            Self::new(indices)
        } else {
            Ok(Self::new_unchecked(indices))
        }
    }

    /// Loads a previously saved permutation from JSON. Always validated.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// The identity permutation of length `n`.
    pub fn identity(n: u32) -> Self {
        Self {
            indices: (0..n).collect(),
        }
    }

    /// A uniformly random permutation of length `n`.
    pub fn shuffled<R: Rng + ?Sized>(n: u32, rng: &mut R) -> Self {
        let mut indices: Vec<u32> = (0..n).collect();
        indices.shuffle(rng);
        Self { indices }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Physical position of logical row `logical`, if it exists.
    pub fn get(&self, logical: usize) -> Option<u32> {
        self.indices.get(logical).copied()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.indices
    }

    pub fn into_vec(self) -> Vec<u32> {
        self.indices
    }

    pub fn is_identity(&self) -> bool {
        self.indices
            .iter()
            .enumerate()
            .all(|(logical, &physical)| physical as usize == logical)
    }

    /// The inverse bijection, mapping physical position to logical row.
    pub fn inverse(&self) -> Result<Self> {
        Ok(Self {
            indices: inverse_indices(&self.indices)?,
        })
    }

    /// Composition: forward-mapping with the result equals forward-mapping
    /// with `self` and then with `next`.
    pub fn then(&self, next: &Permutation) -> Result<Self> {
        RowpermError::check_len(self.len(), next.len())?;
        let indices = self
            .indices
            .iter()
            .map(|&physical| {
                next.get(physical as usize)
                    .ok_or_else(|| out_of_range(physical, next.len()))
            })
            .collect::<Result<Vec<u32>>>()?;
        Ok(Self { indices })
    }
}

impl PermutationSource for Permutation {
    fn number_of_rows(&self) -> usize {
        self.indices.len()
    }

    fn permutation(&self, mode: CopyMode) -> Cow<'_, [u32]> {
        self.indices.permutation(mode)
    }
}

impl AsRef<[u32]> for Permutation {
    fn as_ref(&self) -> &[u32] {
        &self.indices
    }
}

impl TryFrom<Vec<u32>> for Permutation {
    type Error = RowpermError;

    fn try_from(indices: Vec<u32>) -> Result<Self> {
        Self::new(indices)
    }
}

impl From<Permutation> for Vec<u32> {
    fn from(permutation: Permutation) -> Vec<u32> {
        permutation.indices
    }
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
