//! Typed-buffer adapter: applies the row mappers to raw engine buffers.

use bytemuck::Pod;

use crate::error::Result;
use crate::kernels::reorder::reorder_vector;
use crate::kernels::Direction;
use crate::permutation::PermutationSource;
use crate::types::RowDataType;
use crate::utils::{read_typed_values, typed_slice_to_bytes};

/// Reorders a raw little-endian buffer of `dtype` elements, one per row.
///
/// # Errors
/// `BufferMismatch` if `bytes` is not a whole number of elements, and
/// `LengthMismatch` if the element count differs from the permutation length.
pub fn permute_buffer<S>(
    permutation: &S,
    bytes: &[u8],
    dtype: RowDataType,
    direction: Direction,
) -> Result<Vec<u8>>
where
    S: PermutationSource + ?Sized,
{
    log::debug!(
        "permute_buffer: {} bytes of {} ({:?})",
        bytes.len(),
        dtype,
        direction
    );

    macro_rules! dispatch {
        ($($variant:ident => $t:ty),+ $(,)?) => {
            match dtype {
                $(RowDataType::$variant => reorder_typed::<S, $t>(permutation, bytes, direction),)+
            }
        };
    }

    dispatch!(
        Int8 => i8,
        Int16 => i16,
        Int32 => i32,
        Int64 => i64,
        UInt8 => u8,
        UInt16 => u16,
        UInt32 => u32,
        UInt64 => u64,
        Float32 => f32,
        Float64 => f64,
    )
}

fn reorder_typed<S, T>(permutation: &S, bytes: &[u8], direction: Direction) -> Result<Vec<u8>>
where
    S: PermutationSource + ?Sized,
    T: Pod,
{
    let values = read_typed_values::<T>(bytes)?;
    let reordered = reorder_vector(permutation, &values[..], direction)?;
    Ok(typed_slice_to_bytes(&reordered))
}
