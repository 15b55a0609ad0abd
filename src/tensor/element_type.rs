use std::fmt;
use std::str::FromStr;

use crate::error::TensorFileError;

/// Element type of a stored tensor, written to disk as its `type_id()`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ElementType {
    Int32,
    #[default]
    Float32,
}

impl ElementType {
    pub const INT32_ID: i32 = -1;
    pub const FLOAT32_ID: i32 = -2;

    pub fn type_id(&self) -> i32 {
        match self {
            ElementType::Int32 => Self::INT32_ID,
            ElementType::Float32 => Self::FLOAT32_ID,
        }
    }

    pub fn from_type_id(type_id: i32) -> Result<Self, TensorFileError> {
        match type_id {
            Self::INT32_ID => Ok(ElementType::Int32),
            Self::FLOAT32_ID => Ok(ElementType::Float32),
            other => Err(TensorFileError::UnsupportedType(format!("type_id {}", other))),
        }
    }

    pub fn bytes_per_element(&self) -> usize {
        match self {
            ElementType::Int32 => std::mem::size_of::<i32>(),
            ElementType::Float32 => std::mem::size_of::<f32>(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ElementType::Int32 => "int32",
            ElementType::Float32 => "float32",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<i32> for ElementType {
    type Error = TensorFileError;

    fn try_from(type_id: i32) -> Result<Self, Self::Error> {
        Self::from_type_id(type_id)
    }
}

impl FromStr for ElementType {
    type Err = TensorFileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "int32" | "i32" => Ok(ElementType::Int32),
            "float32" | "f32" => Ok(ElementType::Float32),
            other => Err(TensorFileError::UnsupportedType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_ids_match_format() {
        assert_eq!(ElementType::Int32.type_id(), -1);
        assert_eq!(ElementType::Float32.type_id(), -2);
        assert_eq!(ElementType::try_from(-1).unwrap(), ElementType::Int32);
        assert_eq!(ElementType::try_from(-2).unwrap(), ElementType::Float32);
    }

    #[test]
    fn unknown_tags_are_rejected() {
        assert!(matches!(ElementType::try_from(0), Err(TensorFileError::UnsupportedType(_))));
        assert!(matches!(ElementType::try_from(-3), Err(TensorFileError::UnsupportedType(_))));
        assert!(matches!("float64".parse::<ElementType>(), Err(TensorFileError::UnsupportedType(_))));
    }

    #[test]
    fn parses_names() {
        assert_eq!("int32".parse::<ElementType>().unwrap(), ElementType::Int32);
        assert_eq!("F32".parse::<ElementType>().unwrap(), ElementType::Float32);
        assert_eq!(ElementType::Float32.to_string(), "float32");
    }
}
