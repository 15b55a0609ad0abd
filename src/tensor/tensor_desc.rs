use crate::error::TensorFileError;

pub const MAX_RANK: usize = 4;

/// Normalized 4D shape, logical axis order `[outer, slices, rows, cols]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TensorDesc {
    pub outer: usize,
    pub slices: usize,
    pub rows: usize,
    pub cols: usize,
}

/// Left-pads `shape` with size-1 axes until it has exactly four dimensions.
pub fn normalize(shape: &[usize]) -> Result<[usize; MAX_RANK], TensorFileError> {
    if shape.len() > MAX_RANK {
        return Err(TensorFileError::Rank { rank: shape.len() });
    }

    let mut dims = [1; MAX_RANK];
    dims[MAX_RANK - shape.len()..].copy_from_slice(shape);
    Ok(dims)
}

impl TensorDesc {
    pub fn new(outer: usize, slices: usize, rows: usize, cols: usize) -> Self {
        Self { outer, slices, rows, cols }
    }

    /// Normalizes `shape` and rejects shapes whose element count overflows `usize`.
    pub fn from_shape(shape: &[usize]) -> Result<Self, TensorFileError> {
        let [outer, slices, rows, cols] = normalize(shape)?;
        let desc = Self { outer, slices, rows, cols };
        desc.checked_num_elements()
            .ok_or_else(|| TensorFileError::InvalidShape(format!("shape {:?} has too many elements", shape)))?;
        Ok(desc)
    }

    pub fn num_elements(&self) -> usize {
        self.outer * self.slices * self.rows * self.cols
    }

    /// Element count that errors instead of wrapping, for shapes read from untrusted input.
    pub fn checked_num_elements(&self) -> Option<usize> {
        if self.to_dims().contains(&0) {
            return Some(0);
        }
        self.outer
            .checked_mul(self.slices)?
            .checked_mul(self.rows)?
            .checked_mul(self.cols)
    }

    pub fn to_dims(&self) -> [usize; MAX_RANK] {
        [self.outer, self.slices, self.rows, self.cols]
    }

    /// Flat C-order offset of a logical `[outer, slice, row, col]` index.
    pub fn offset(&self, index: [usize; MAX_RANK]) -> Option<usize> {
        let [g, s, r, c] = index;
        if g >= self.outer || s >= self.slices || r >= self.rows || c >= self.cols {
            return None;
        }
        Some(((g * self.slices + s) * self.rows + r) * self.cols + c)
    }
}
