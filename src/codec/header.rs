use std::io::{self, Read};

use crate::error::{Result, TensorFileError};
use crate::tensor::element_type::ElementType;

pub const PREAMBLE_BYTES: usize = 16;

const SINGLE_KIND: i32 = 0;
const MULTI_KIND: i32 = 1;

/// How many tensors follow the preamble.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContainerLayout {
    Single,
    Multi { count: usize },
}

/// The fixed 16-byte file preamble:
/// `container_kind, multi_x, multi_y, type_id`, each a little-endian `i32`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Preamble {
    pub layout: ContainerLayout,
    pub element_type: ElementType,
}

impl Preamble {
    pub fn new(layout: ContainerLayout, element_type: ElementType) -> Self {
        Self { layout, element_type }
    }

    pub fn num_tensors(&self) -> usize {
        match self.layout {
            ContainerLayout::Single => 1,
            ContainerLayout::Multi { count } => count,
        }
    }

    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        // multi_y is always written as 1
        let (kind, multi_x, multi_y) = match self.layout {
            ContainerLayout::Single => (SINGLE_KIND, 1, 1),
            ContainerLayout::Multi { count } => {
                let count = i32::try_from(count).map_err(|_| {
                    TensorFileError::InvalidHeader(format!("{} tensors do not fit in the header", count))
                })?;
                (MULTI_KIND, count, 1)
            }
        };

        write_i32s(out, &[kind, multi_x, multi_y, self.element_type.type_id()]);
        Ok(())
    }

    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let [kind, multi_x, multi_y, type_id] = read_i32s::<_, 4>(reader, "preamble")?;

        let element_type = ElementType::from_type_id(type_id)?;

        // multi_x/multi_y carry no meaning for a single tensor
        let layout = if kind == SINGLE_KIND {
            ContainerLayout::Single
        } else {
            let count = multi_x
                .checked_mul(multi_y)
                .and_then(|count| usize::try_from(count).ok())
                .ok_or_else(|| {
                    TensorFileError::InvalidHeader(format!("bad tensor count {} x {}", multi_x, multi_y))
                })?;
            ContainerLayout::Multi { count }
        };

        Ok(Self { layout, element_type })
    }
}

pub(crate) fn write_i32s(out: &mut Vec<u8>, values: &[i32]) {
    for value in values {
        out.extend_from_slice(&value.to_le_bytes());
    }
}

pub(crate) fn read_i32s<R: Read, const N: usize>(reader: &mut R, context: &'static str) -> Result<[i32; N]> {
    let mut buf = [0u8; 4];
    let mut values = [0i32; N];
    for value in values.iter_mut() {
        read_exact(reader, &mut buf, N * 4, context)?;
        *value = i32::from_le_bytes(buf);
    }
    Ok(values)
}

fn read_exact<R: Read>(reader: &mut R, buf: &mut [u8], expected: usize, context: &'static str) -> Result<()> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => TensorFileError::TruncatedStream { expected, context },
        _ => TensorFileError::Io(e),
    })
}
