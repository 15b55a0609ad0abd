//! `ndarray` interop: arrays can be saved directly, decoded tensors come back as `Array4`.

use std::borrow::Cow;

use ndarray::{Array4, ArrayBase, Data, Dimension};

use crate::error::{Result, TensorFileError};
use crate::tensor::source::{SourceElement, SourceElements, TensorSource};
use crate::tensor::tensor::Tensor;
use crate::tensor::tensor_data::TensorData;

impl<A, S, D> TensorSource for ArrayBase<S, D>
where
    A: SourceElement,
    S: Data<Elem = A>,
    D: Dimension,
{
    fn shape(&self) -> Vec<usize> {
        ArrayBase::shape(self).to_vec()
    }

    fn elements(&self) -> SourceElements<'_> {
        // Non-contiguous or transposed views are gathered in logical order
        let values = match self.as_slice() {
            Some(slice) => Cow::Borrowed(slice),
            None => Cow::Owned(self.iter().cloned().collect()),
        };
        A::wrap(values)
    }
}

/// Element types a decoded tensor can be read out as.
pub trait StoredElement: Copy {
    fn collect_from(data: &TensorData) -> Vec<Self>;
}

impl StoredElement for i32 {
    fn collect_from(data: &TensorData) -> Vec<Self> {
        match data {
            TensorData::Int32(values) => values.clone(),
            TensorData::Float32(values) => values.iter().map(|&v| v as i32).collect(),
        }
    }
}

impl StoredElement for f32 {
    fn collect_from(data: &TensorData) -> Vec<Self> {
        match data {
            TensorData::Float32(values) => values.clone(),
            TensorData::Int32(values) => values.iter().map(|&v| v as f32).collect(),
        }
    }
}

impl Tensor {
    /// Copies the tensor into an `[outer, slices, rows, cols]` array, casting if needed.
    pub fn to_array<T: StoredElement>(&self) -> Result<Array4<T>> {
        let [outer, slices, rows, cols] = self.shape();
        Array4::from_shape_vec((outer, slices, rows, cols), T::collect_from(self.data()))
            .map_err(|e| TensorFileError::InvalidShape(e.to_string()))
    }
}
