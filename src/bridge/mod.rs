// In: src/bridge/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Bridge Layer
// ====================================================================================
//
// Per-row results rarely arrive as `Vec<T>`. Numeric engines hand back raw
// little-endian buffers tagged with an element type, and hosts often hold
// columns as Arrow arrays. The bridge adapts both shapes onto the pure
// `kernels` without adding any semantics of its own.
//
// Data Flow (raw buffer):
//
//   1. [Engine buffer: &[u8] + RowDataType]
//         |
//         `-> utils::read_typed_values::<T>  (zero-copy when aligned)
//         |
//   2. [kernels::reorder::reorder_vector]    -> Vec<T>
//         |
//         `-> utils::typed_slice_to_bytes
//         |
//   3. [Vec<u8> in the requested row order]
//
// Data Flow (Arrow):
//
//   1. [&dyn Array]  -> gather indices from the permutation
//   2. [arrow::compute::take]  -> ArrayRef (nulls preserved)
//
// ====================================================================================
pub mod arrow_impl;
pub mod buffer;

pub use arrow_impl::{array_to_buffer, buffer_to_array, permute_arrow_array};
pub use buffer::permute_buffer;
