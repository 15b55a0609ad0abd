use tracing::{debug, warn};

use crate::config::CodecConfig;
use crate::error::{Result, TensorFileError};
use crate::tensor::source::TensorSource;
use crate::tensor::tensor_desc::TensorDesc;

use super::container::Container;
use super::header::{ContainerLayout, Preamble, PREAMBLE_BYTES};
use super::payload::write_payload;
use super::shape_block::{write_shape, SHAPE_BLOCK_BYTES};

/// Encodes one array as a single-tensor container of `config.element_type`.
pub fn encode_tensor(source: &dyn TensorSource, config: &CodecConfig) -> Result<Vec<u8>> {
    encode_with_layout(ContainerLayout::Single, &[source], config)
}

/// Encodes an ordered group of arrays. Every tensor is stored as `config.element_type`.
pub fn encode_tensors(sources: &[&dyn TensorSource], config: &CodecConfig) -> Result<Vec<u8>> {
    encode_with_layout(ContainerLayout::Multi { count: sources.len() }, sources, config)
}

/// Re-encodes a decoded container, keeping its layout.
pub fn encode_container(container: &Container, config: &CodecConfig) -> Result<Vec<u8>> {
    let sources: Vec<&dyn TensorSource> = container
        .tensors()
        .iter()
        .map(|t| t as &dyn TensorSource)
        .collect();
    encode_with_layout(container.layout(), &sources, config)
}

// The whole container is built in memory so a failure never leaves partial output behind
fn encode_with_layout(layout: ContainerLayout, sources: &[&dyn TensorSource], config: &CodecConfig) -> Result<Vec<u8>> {
    let element_type = config.element_type;
    let mut out = Vec::with_capacity(PREAMBLE_BYTES);
    Preamble::new(layout, element_type).write_to(&mut out)?;

    for (index, source) in sources.iter().enumerate() {
        let shape = source.shape();
        let desc = TensorDesc::from_shape(&shape)?;

        let elements = source.elements();
        if elements.len() != desc.num_elements() {
            return Err(TensorFileError::InvalidShape(format!(
                "tensor {} has shape {:?} but {} elements",
                index,
                shape,
                elements.len()
            )));
        }
        if elements.is_empty() {
            warn!(index, ?shape, "tensor is empty, writing shape only");
        }

        let parallel = config.use_parallel(elements.len());
        let converted = elements.convert(element_type, parallel);
        if converted.lossy > 0 && config.warn_precision_loss {
            warn!(
                index,
                lossy = converted.lossy,
                total = elements.len(),
                %element_type,
                "values changed when converting"
            );
        }

        out.reserve(SHAPE_BLOCK_BYTES + desc.num_elements() * element_type.bytes_per_element());
        write_shape(&desc, &mut out)?;
        write_payload(&converted.data, &mut out, parallel);
        debug!(index, dims = ?desc.to_dims(), parallel, "encoded tensor");
    }

    Ok(out)
}
