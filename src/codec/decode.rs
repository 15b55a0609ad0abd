use std::io::{self, Read};

use tracing::debug;

use crate::config::CodecConfig;
use crate::error::{Result, TensorFileError};
use crate::tensor::element_type::ElementType;
use crate::tensor::tensor::Tensor;
use crate::tensor::tensor_desc::TensorDesc;

use super::container::Container;
use super::header::{ContainerLayout, Preamble};
use super::payload::read_payload;
use super::shape_block::read_shape;

// Caps the up-front allocation when a header claims a huge tensor count
const MAX_PREALLOCATED_TENSORS: usize = 1024;

/// Decodes a container from `reader`. Bytes after the last declared tensor are left unread.
pub fn decode<R: Read>(reader: &mut R, config: &CodecConfig) -> Result<Container> {
    let preamble = Preamble::read_from(reader)?;
    debug!(?preamble, "read preamble");

    let element_type = preamble.element_type;
    match preamble.layout {
        ContainerLayout::Single => Ok(Container::Single(read_tensor(reader, element_type, config)?)),
        ContainerLayout::Multi { count } => {
            let mut tensors = Vec::with_capacity(count.min(MAX_PREALLOCATED_TENSORS));
            for _ in 0..count {
                tensors.push(read_tensor(reader, element_type, config)?);
            }
            Ok(Container::Multi { element_type, tensors })
        }
    }
}

pub fn decode_bytes(bytes: &[u8], config: &CodecConfig) -> Result<Container> {
    let mut reader = bytes;
    decode(&mut reader, config)
}

fn read_tensor<R: Read>(reader: &mut R, element_type: ElementType, config: &CodecConfig) -> Result<Tensor> {
    let desc = read_shape(reader)?;
    let parallel = desc.checked_num_elements().is_some_and(|n| config.use_parallel(n));
    let data = read_payload(reader, &desc, element_type, parallel)?;
    Tensor::from_parts(desc, data)
}

/// Header and shapes of a file, without its payloads.
#[derive(Clone, Debug, PartialEq)]
pub struct ContainerInfo {
    pub preamble: Preamble,
    pub shapes: Vec<TensorDesc>,
}

impl ContainerInfo {
    pub fn payload_bytes(&self) -> usize {
        let width = self.preamble.element_type.bytes_per_element();
        self.shapes.iter().map(|desc| desc.num_elements() * width).sum()
    }
}

/// Walks the container structure, skipping over payloads.
pub fn inspect<R: Read>(reader: &mut R) -> Result<ContainerInfo> {
    let preamble = Preamble::read_from(reader)?;
    let width = preamble.element_type.bytes_per_element() as u64;

    let mut shapes = Vec::with_capacity(preamble.num_tensors().min(MAX_PREALLOCATED_TENSORS));
    for _ in 0..preamble.num_tensors() {
        let desc = read_shape(reader)?;
        let byte_len = desc
            .checked_num_elements()
            .and_then(|n| (n as u64).checked_mul(width))
            .ok_or_else(|| TensorFileError::InvalidShape(format!("shape {:?} is too large", desc.to_dims())))?;

        let skipped = io::copy(&mut reader.by_ref().take(byte_len), &mut io::sink())?;
        if skipped < byte_len {
            return Err(TensorFileError::TruncatedStream {
                expected: byte_len as usize,
                context: "payload",
            });
        }
        shapes.push(desc);
    }

    Ok(ContainerInfo { preamble, shapes })
}
