pub mod element_type;
pub mod source;
#[allow(clippy::module_inception)]
pub mod tensor;
pub mod tensor_data;
pub mod tensor_desc;
