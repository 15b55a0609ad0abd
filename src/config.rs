use crate::error::TensorFileError;
use crate::tensor::element_type::ElementType;

pub struct CodecConfig {
    /// Element type written to the payload.
    pub element_type: ElementType,
    /// Write to a temp file next to the target and rename over it on success.
    pub atomic_write: bool,
    pub warn_precision_loss: bool,
    /// Tensors with at least this many elements are converted with rayon.
    pub parallel_threshold: usize,
}

impl CodecConfig {
    pub fn build(self) -> Result<Self, TensorFileError> {
        check_parallel_threshold(self.parallel_threshold)?;

        Ok(self)
    }

    pub fn with_element_type(mut self, element_type: ElementType) -> Self {
        self.element_type = element_type;
        self
    }

    pub(crate) fn use_parallel(&self, num_elements: usize) -> bool {
        num_elements >= self.parallel_threshold
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            element_type: ElementType::Float32,
            atomic_write: true,
            warn_precision_loss: true,
            parallel_threshold: 1 << 16,
        }
    }
}

fn check_parallel_threshold(threshold: usize) -> Result<(), TensorFileError> {
    if threshold == 0 {
        return Err(TensorFileError::InvalidConfig(
            "parallel_threshold must be at least 1".to_string(),
        ));
    }
    Ok(())
}
