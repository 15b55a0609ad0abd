use crate::error::{Result, TensorFileError};
use crate::tensor::element_type::ElementType;
use crate::tensor::tensor::Tensor;

use super::header::ContainerLayout;

/// A decoded file: one tensor, or an ordered group sharing one element type.
#[derive(Clone, Debug, PartialEq)]
pub enum Container {
    Single(Tensor),
    Multi {
        element_type: ElementType,
        tensors: Vec<Tensor>,
    },
}

impl Container {
    pub fn element_type(&self) -> ElementType {
        match self {
            Container::Single(tensor) => tensor.element_type(),
            Container::Multi { element_type, .. } => *element_type,
        }
    }

    pub fn layout(&self) -> ContainerLayout {
        match self {
            Container::Single(_) => ContainerLayout::Single,
            Container::Multi { tensors, .. } => ContainerLayout::Multi { count: tensors.len() },
        }
    }

    pub fn len(&self) -> usize {
        self.tensors().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tensors().is_empty()
    }

    pub fn tensors(&self) -> &[Tensor] {
        match self {
            Container::Single(tensor) => std::slice::from_ref(tensor),
            Container::Multi { tensors, .. } => tensors,
        }
    }

    pub fn into_tensors(self) -> Vec<Tensor> {
        match self {
            Container::Single(tensor) => vec![tensor],
            Container::Multi { tensors, .. } => tensors,
        }
    }

    /// The single tensor, or the first one of a group.
    pub fn into_first(self) -> Result<Tensor> {
        self.into_tensors()
            .into_iter()
            .next()
            .ok_or(TensorFileError::EmptyContainer)
    }
}
