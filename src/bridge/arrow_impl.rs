//! Arrow adapter: reorders Arrow arrays with the `take` kernel and converts
//! primitive arrays to and from raw engine buffers.

use arrow::array::{make_array, Array, ArrayData, ArrayRef, UInt32Array};
use arrow::buffer::Buffer;
use arrow::compute::kernels::take;

use crate::error::{Result, RowpermError};
use crate::kernels::{inverse_indices, out_of_range, Direction};
use crate::permutation::{CopyMode, PermutationSource};
use crate::types::RowDataType;

/// Reorders an Arrow array of any type, one element per row. Nulls move with their rows.
pub fn permute_arrow_array<S>(
    permutation: &S,
    array: &dyn Array,
    direction: Direction,
) -> Result<ArrayRef>
where
    S: PermutationSource + ?Sized,
{
    let perm = permutation.permutation(CopyMode::View);
    let n = array.len();
    RowpermError::check_len(perm.len(), n)?;

    // `take` gathers, so forward mapping needs the inverse.
    let gather = match direction {
        Direction::Forward => inverse_indices(&perm)?,
        Direction::Backward => {
            if let Some(&bad) = perm.iter().find(|&&physical| physical as usize >= n) {
                return Err(out_of_range(bad, n));
            }
            perm.into_owned()
        }
    };

    let indices = UInt32Array::from(gather);
    let reordered = take::take(array, &indices, None)?;
    log::debug!(
        "permute_arrow_array: reordered {} rows of {} ({:?})",
        n,
        array.data_type(),
        direction
    );
    Ok(reordered)
}

/// Extracts the raw little-endian value buffer of a null-free primitive array.
pub fn array_to_buffer(array: &dyn Array) -> Result<(Vec<u8>, RowDataType)> {
    let dtype = RowDataType::from_arrow_type(array.data_type())?;
    if array.null_count() > 0 {
        return Err(RowpermError::UnsupportedType(format!(
            "{} array with {} nulls has no raw buffer form",
            dtype,
            array.null_count()
        )));
    }

    let data = array.to_data();
    let values = data.buffers().first().ok_or_else(|| {
        RowpermError::InternalError(format!("{} array has no value buffer", dtype))
    })?;

    let width = dtype.byte_width();
    let start = data.offset() * width;
    let end = start + data.len() * width;
    Ok((values.as_slice()[start..end].to_vec(), dtype))
}

/// Wraps a raw little-endian buffer of `dtype` elements as an Arrow array.
pub fn buffer_to_array(bytes: Vec<u8>, dtype: RowDataType) -> Result<ArrayRef> {
    let width = dtype.byte_width();
    if bytes.len() % width != 0 {
        return Err(RowpermError::BufferMismatch(bytes.len(), width));
    }

    // `Buffer::from` copies into an aligned allocation; a raw `Vec<u8>` is only
    // guaranteed byte alignment.
    let data = ArrayData::builder(dtype.to_arrow_type())
        .len(bytes.len() / width)
        .add_buffer(Buffer::from(bytes.as_slice()))
        .build()?;
    Ok(make_array(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permutation::Permutation;
    use arrow::array::{Float64Array, Int32Array, Int64Array, StringArray};

    #[test]
    fn test_permute_arrow_array_with_nulls() {
        let p = Permutation::new(vec![2, 0, 3, 1]).unwrap();
        let logical = Int32Array::from(vec![Some(10), None, Some(30), Some(40)]);

        let physical = permute_arrow_array(&p, &logical, Direction::Forward).unwrap();
        let expected = Int32Array::from(vec![None, Some(40), Some(10), Some(30)]);
        assert_eq!(physical.to_data(), expected.to_data());

        let back = permute_arrow_array(&p, physical.as_ref(), Direction::Backward).unwrap();
        assert_eq!(back.to_data(), logical.to_data());
    }

    #[test]
    fn test_permute_string_array() {
        let p = Permutation::new(vec![1, 0, 2]).unwrap();
        let names = StringArray::from(vec!["CD4", "CD8A", "MS4A1"]);
        let physical = permute_arrow_array(&p, &names, Direction::Forward).unwrap();
        let expected = StringArray::from(vec!["CD8A", "CD4", "MS4A1"]);
        assert_eq!(physical.to_data(), expected.to_data());
    }

    #[test]
    fn test_arrow_length_mismatch() {
        let p = Permutation::identity(3);
        let array = Float64Array::from(vec![1.0, 2.0]);
        assert!(matches!(
            permute_arrow_array(&p, &array, Direction::Forward),
            Err(RowpermError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_backward_out_of_range_errors() {
        let bad: Vec<u32> = vec![0, 9];
        let array = Float64Array::from(vec![1.0, 2.0]);
        assert!(matches!(
            permute_arrow_array(&bad, &array, Direction::Backward),
            Err(RowpermError::InvalidPermutation(_))
        ));
    }

    #[test]
    fn test_buffer_array_conversion() {
        let array = Float64Array::from(vec![1.5, 2.5, 3.5]);
        let (bytes, dtype) = array_to_buffer(&array).unwrap();
        assert_eq!(dtype, RowDataType::Float64);
        assert_eq!(bytes.len(), 24);

        let rebuilt = buffer_to_array(bytes, dtype).unwrap();
        assert_eq!(rebuilt.to_data(), array.to_data());
    }

    #[test]
    fn test_buffer_to_array_from_wide_elements() {
        let values: Vec<i64> = vec![-3, 7, i64::MAX];
        let bytes = crate::utils::typed_slice_to_bytes(&values);
        let rebuilt = buffer_to_array(bytes, RowDataType::Int64).unwrap();
        assert_eq!(rebuilt.to_data(), Int64Array::from(values).to_data());

        assert!(matches!(
            buffer_to_array(vec![0u8; 5], RowDataType::Float32),
            Err(RowpermError::BufferMismatch(5, 4))
        ));
    }

    #[test]
    fn test_sliced_array_respects_offset() {
        let array = Int32Array::from(vec![1, 2, 3, 4, 5]);
        let sliced = array.slice(1, 3);
        let (bytes, _) = array_to_buffer(&sliced).unwrap();
        let rebuilt = buffer_to_array(bytes, RowDataType::Int32).unwrap();
        assert_eq!(rebuilt.to_data(), Int32Array::from(vec![2, 3, 4]).to_data());
    }

    #[test]
    fn test_array_with_nulls_has_no_buffer_form() {
        let array = Int32Array::from(vec![Some(1), None]);
        assert!(matches!(
            array_to_buffer(&array),
            Err(RowpermError::UnsupportedType(_))
        ));
        assert!(array_to_buffer(&StringArray::from(vec!["a"])).is_err());
    }
}
