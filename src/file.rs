use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::codec::container::Container;
use crate::codec::decode::{decode, inspect, ContainerInfo};
use crate::codec::encode::{encode_container, encode_tensor, encode_tensors};
use crate::config::CodecConfig;
use crate::error::Result;
use crate::tensor::source::TensorSource;
use crate::tensor::tensor::Tensor;

pub fn save_tensor<P: AsRef<Path>>(path: P, source: &dyn TensorSource, config: &CodecConfig) -> Result<()> {
    let bytes = encode_tensor(source, config)?;
    write_file(path.as_ref(), &bytes, config.atomic_write)
}

pub fn save_tensors<P: AsRef<Path>>(path: P, sources: &[&dyn TensorSource], config: &CodecConfig) -> Result<()> {
    let bytes = encode_tensors(sources, config)?;
    write_file(path.as_ref(), &bytes, config.atomic_write)
}

/// Writes a decoded container back out in `config.element_type`, keeping its layout.
pub fn save_container<P: AsRef<Path>>(path: P, container: &Container, config: &CodecConfig) -> Result<()> {
    let bytes = encode_container(container, config)?;
    write_file(path.as_ref(), &bytes, config.atomic_write)
}

pub fn load<P: AsRef<Path>>(path: P, config: &CodecConfig) -> Result<Container> {
    let path = path.as_ref();
    let mut reader = BufReader::new(File::open(path)?);
    let container = decode(&mut reader, config)?;
    debug!(path = %path.display(), tensors = container.len(), element_type = %container.element_type(), "loaded");
    Ok(container)
}

/// Loads the tensor of a single-tensor file, or the first tensor of a group.
pub fn load_tensor<P: AsRef<Path>>(path: P, config: &CodecConfig) -> Result<Tensor> {
    load(path, config)?.into_first()
}

/// Loads every tensor in the file. A single-tensor file gives a one-element vec.
pub fn load_tensors<P: AsRef<Path>>(path: P, config: &CodecConfig) -> Result<Vec<Tensor>> {
    Ok(load(path, config)?.into_tensors())
}

pub fn inspect_file<P: AsRef<Path>>(path: P) -> Result<ContainerInfo> {
    let mut reader = BufReader::new(File::open(path)?);
    inspect(&mut reader)
}

// Encoding has already succeeded by the time this runs, so the only failures left are IO
fn write_file(path: &Path, bytes: &[u8], atomic: bool) -> Result<()> {
    if atomic {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path)?;
    } else {
        fs::write(path, bytes)?;
    }

    debug!(path = %path.display(), bytes = bytes.len(), atomic, "wrote tensor file");
    Ok(())
}
