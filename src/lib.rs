//! Reading and writing 4D tensors in a small little-endian binary container.
//!
//! A file holds either one tensor or an ordered group of tensors sharing an
//! element type (`i32` or `f32`). Arrays of rank 0 to 3 are left-padded with
//! size-1 axes so every stored tensor is `[outer, slices, rows, cols]`.

pub mod array;
pub mod codec;
pub mod config;
pub mod error;
pub mod file;
pub mod image_io;
pub mod tensor;

pub use codec::container::Container;
pub use codec::decode::{decode, decode_bytes, inspect, ContainerInfo};
pub use codec::encode::{encode_container, encode_tensor, encode_tensors};
pub use codec::header::{ContainerLayout, Preamble};
pub use config::CodecConfig;
pub use error::{Result, TensorFileError};
pub use file::{inspect_file, load, load_tensor, load_tensors, save_container, save_tensor, save_tensors};
pub use image_io::{load_image, save_image};
pub use tensor::element_type::ElementType;
pub use tensor::source::{SourceElements, TensorSource};
pub use tensor::tensor::Tensor;
pub use tensor::tensor_data::{Element, TensorData};
pub use tensor::tensor_desc::{normalize, TensorDesc};
