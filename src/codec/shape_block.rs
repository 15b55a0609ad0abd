//! Per-tensor shape block: four little-endian `i32` written as
//! `rows, cols, slices, outer`, the order the C++ and numpy tensorlib helpers write.
//! Logical axis order stays `[outer, slices, rows, cols]`.

use std::io::Read;

use crate::error::{Result, TensorFileError};
use crate::tensor::tensor_desc::TensorDesc;

use super::header::{read_i32s, write_i32s};

pub const SHAPE_BLOCK_BYTES: usize = 16;

pub fn write_shape(desc: &TensorDesc, out: &mut Vec<u8>) -> Result<()> {
    let rows = dim_to_i32(desc.rows)?;
    let cols = dim_to_i32(desc.cols)?;
    let slices = dim_to_i32(desc.slices)?;
    let outer = dim_to_i32(desc.outer)?;

    write_i32s(out, &[rows, cols, slices, outer]);
    Ok(())
}

pub fn read_shape<R: Read>(reader: &mut R) -> Result<TensorDesc> {
    let [rows, cols, slices, outer] = read_i32s::<_, 4>(reader, "shape block")?;

    Ok(TensorDesc::new(
        dim_from_i32(outer)?,
        dim_from_i32(slices)?,
        dim_from_i32(rows)?,
        dim_from_i32(cols)?,
    ))
}

fn dim_to_i32(dim: usize) -> Result<i32> {
    i32::try_from(dim).map_err(|_| TensorFileError::InvalidShape(format!("dimension {} exceeds i32", dim)))
}

fn dim_from_i32(dim: i32) -> Result<usize> {
    usize::try_from(dim).map_err(|_| TensorFileError::InvalidShape(format!("negative dimension {}", dim)))
}
