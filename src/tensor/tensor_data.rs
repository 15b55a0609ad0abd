use super::element_type::ElementType;

#[derive(Clone, Debug, PartialEq)]
pub enum TensorData {
    Int32(Vec<i32>),
    Float32(Vec<f32>),
}

/// A single element read out of a tensor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Element {
    Int32(i32),
    Float32(f32),
}

impl TensorData {
    pub fn zeros(element_type: ElementType, len: usize) -> Self {
        match element_type {
            ElementType::Int32 => TensorData::Int32(vec![0; len]),
            ElementType::Float32 => TensorData::Float32(vec![0.0; len]),
        }
    }

    pub fn element_type(&self) -> ElementType {
        match self {
            TensorData::Int32(_) => ElementType::Int32,
            TensorData::Float32(_) => ElementType::Float32,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TensorData::Int32(values) => values.len(),
            TensorData::Float32(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, offset: usize) -> Option<Element> {
        match self {
            TensorData::Int32(values) => values.get(offset).copied().map(Element::Int32),
            TensorData::Float32(values) => values.get(offset).copied().map(Element::Float32),
        }
    }

    /// Converts to `element_type`. Float to int truncates toward zero and saturates.
    pub fn cast(&self, element_type: ElementType) -> TensorData {
        match (self, element_type) {
            (TensorData::Int32(values), ElementType::Int32) => TensorData::Int32(values.clone()),
            (TensorData::Float32(values), ElementType::Float32) => TensorData::Float32(values.clone()),
            (TensorData::Int32(values), ElementType::Float32) => {
                TensorData::Float32(values.iter().map(|&v| v as f32).collect())
            }
            (TensorData::Float32(values), ElementType::Int32) => {
                TensorData::Int32(values.iter().map(|&v| v as i32).collect())
            }
        }
    }
}

impl Element {
    pub fn as_f64(&self) -> f64 {
        match *self {
            Element::Int32(v) => v as f64,
            Element::Float32(v) => v as f64,
        }
    }
}

impl From<Vec<i32>> for TensorData {
    fn from(values: Vec<i32>) -> Self {
        TensorData::Int32(values)
    }
}

impl From<Vec<f32>> for TensorData {
    fn from(values: Vec<f32>) -> Self {
        TensorData::Float32(values)
    }
}
