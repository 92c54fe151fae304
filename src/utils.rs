//! This module provides shared, low-level helpers for moving between raw byte
//! buffers and typed slices.
//!
//! All casting goes through `bytemuck`, so there is no `unsafe` here.

use std::borrow::Cow;

use bytemuck::{Pod, PodCastError};

use crate::error::RowpermError;

/// Reinterprets a byte slice as a slice of a plain-old-data type.
///
/// Borrows when the bytes are suitably aligned and copies into an aligned
/// vector otherwise (e.g. a slice into a foreign buffer).
///
/// # Errors
/// Returns `RowpermError::BufferMismatch` if the length is not a multiple of the
/// element size.
pub fn read_typed_values<T: Pod>(bytes: &[u8]) -> Result<Cow<'_, [T]>, RowpermError> {
    let width = std::mem::size_of::<T>();
    if bytes.len() % width != 0 {
        return Err(RowpermError::BufferMismatch(bytes.len(), width));
    }
    match bytemuck::try_cast_slice(bytes) {
        Ok(values) => Ok(Cow::Borrowed(values)),
        Err(PodCastError::TargetAlignmentGreaterAndInputNotAligned) => Ok(Cow::Owned(
            bytes
                .chunks_exact(width)
                .map(bytemuck::pod_read_unaligned::<T>)
                .collect(),
        )),
        Err(e) => Err(e.into()),
    }
}

/// Converts a typed slice into an owned little-endian `Vec<u8>`.
pub fn typed_slice_to_bytes<T: Pod>(data: &[T]) -> Vec<u8> {
    bytemuck::cast_slice(data).to_vec()
}
