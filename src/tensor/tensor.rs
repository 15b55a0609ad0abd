use crate::error::{Result, TensorFileError};

use super::element_type::ElementType;
use super::tensor_data::{Element, TensorData};
use super::tensor_desc::{TensorDesc, MAX_RANK};

/// A host-side tensor: normalized 4D descriptor plus typed C-order data.
#[derive(Clone, Debug, PartialEq)]
pub struct Tensor {
    desc: TensorDesc,
    data: TensorData,
}

impl Tensor {
    /// Builds a tensor from a shape of rank 0 to 4. The shape is left-padded to 4D.
    pub fn new(shape: &[usize], data: impl Into<TensorData>) -> Result<Self> {
        Self::from_parts(TensorDesc::from_shape(shape)?, data.into())
    }

    pub fn from_parts(desc: TensorDesc, data: TensorData) -> Result<Self> {
        if desc.checked_num_elements() != Some(data.len()) {
            return Err(TensorFileError::InvalidShape(format!(
                "shape {:?} needs {:?} elements, got {}",
                desc.to_dims(),
                desc.checked_num_elements(),
                data.len()
            )));
        }
        Ok(Self { desc, data })
    }

    pub fn zeros(shape: &[usize], element_type: ElementType) -> Result<Self> {
        let desc = TensorDesc::from_shape(shape)?;
        let data = TensorData::zeros(element_type, desc.num_elements());
        Ok(Self { desc, data })
    }

    /// `0, 1, 2, ...` laid out in C order over `shape`.
    pub fn arange(shape: &[usize], element_type: ElementType) -> Result<Self> {
        let desc = TensorDesc::from_shape(shape)?;
        let len = desc.num_elements();
        let data = match element_type {
            ElementType::Int32 => TensorData::Int32((0..len).map(|v| v as i32).collect()),
            ElementType::Float32 => TensorData::Float32((0..len).map(|v| v as f32).collect()),
        };
        Ok(Self { desc, data })
    }

    pub fn desc(&self) -> &TensorDesc {
        &self.desc
    }

    /// Logical shape `[outer, slices, rows, cols]`.
    pub fn shape(&self) -> [usize; MAX_RANK] {
        self.desc.to_dims()
    }

    pub fn element_type(&self) -> ElementType {
        self.data.element_type()
    }

    pub fn num_elements(&self) -> usize {
        self.data.len()
    }

    pub fn size_in_bytes(&self) -> usize {
        self.num_elements() * self.element_type().bytes_per_element()
    }

    pub fn data(&self) -> &TensorData {
        &self.data
    }

    pub fn into_data(self) -> TensorData {
        self.data
    }

    pub fn as_i32(&self) -> Option<&[i32]> {
        match &self.data {
            TensorData::Int32(values) => Some(values),
            TensorData::Float32(_) => None,
        }
    }

    pub fn as_f32(&self) -> Option<&[f32]> {
        match &self.data {
            TensorData::Float32(values) => Some(values),
            TensorData::Int32(_) => None,
        }
    }

    pub fn get(&self, index: [usize; MAX_RANK]) -> Option<Element> {
        self.desc.offset(index).and_then(|offset| self.data.get(offset))
    }

    pub fn cast(&self, element_type: ElementType) -> Tensor {
        Tensor {
            desc: self.desc,
            data: self.data.cast(element_type),
        }
    }
}
