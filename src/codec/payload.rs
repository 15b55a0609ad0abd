use std::io::Read;

use rayon::prelude::*;

use crate::error::{Result, TensorFileError};
use crate::tensor::element_type::ElementType;
use crate::tensor::tensor_data::TensorData;
use crate::tensor::tensor_desc::TensorDesc;

pub fn write_payload(data: &TensorData, out: &mut Vec<u8>, parallel: bool) {
    out.reserve(data.len() * data.element_type().bytes_per_element());
    match data {
        TensorData::Int32(values) => write_values(values, out, parallel, i32::to_le_bytes),
        TensorData::Float32(values) => write_values(values, out, parallel, f32::to_le_bytes),
    }
}

fn write_values<T: Copy + Send + Sync>(values: &[T], out: &mut Vec<u8>, parallel: bool, to_bytes: fn(T) -> [u8; 4]) {
    if parallel {
        out.par_extend(values.par_iter().flat_map_iter(|&v| to_bytes(v)));
    } else {
        for &v in values {
            out.extend_from_slice(&to_bytes(v));
        }
    }
}

/// Reads one tensor's payload in a single bulk read.
pub fn read_payload<R: Read>(reader: &mut R, desc: &TensorDesc, element_type: ElementType, parallel: bool) -> Result<TensorData> {
    let byte_len = desc
        .checked_num_elements()
        .and_then(|n| n.checked_mul(element_type.bytes_per_element()))
        .ok_or_else(|| TensorFileError::InvalidShape(format!("shape {:?} is too large", desc.to_dims())))?;

    // Bounded by what the stream actually holds, not by what the header claims
    let mut bytes = Vec::new();
    reader.by_ref().take(byte_len as u64).read_to_end(&mut bytes)?;
    if bytes.len() < byte_len {
        return Err(TensorFileError::TruncatedStream {
            expected: byte_len,
            context: "payload",
        });
    }

    let data = match element_type {
        ElementType::Int32 => TensorData::Int32(read_values(&bytes, parallel, i32::from_le_bytes)),
        ElementType::Float32 => TensorData::Float32(read_values(&bytes, parallel, f32::from_le_bytes)),
    };
    Ok(data)
}

fn read_values<T: Send>(bytes: &[u8], parallel: bool, from_bytes: fn([u8; 4]) -> T) -> Vec<T> {
    if parallel {
        bytes
            .par_chunks_exact(4)
            .map(|c| from_bytes([c[0], c[1], c[2], c[3]]))
            .collect()
    } else {
        bytes
            .chunks_exact(4)
            .map(|c| from_bytes([c[0], c[1], c[2], c[3]]))
            .collect()
    }
}
