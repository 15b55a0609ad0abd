use std::borrow::Cow;

use rayon::prelude::*;

use super::element_type::ElementType;
use crate::error::Result;

use super::tensor::Tensor;
use super::tensor_data::TensorData;
use super::tensor_desc::TensorDesc;

/// Elements of a source array in C order, in whatever width the source holds them.
#[derive(Clone, Debug)]
pub enum SourceElements<'a> {
    Int32(Cow<'a, [i32]>),
    Int64(Cow<'a, [i64]>),
    Float32(Cow<'a, [f32]>),
    Float64(Cow<'a, [f64]>),
}

/// Anything that can be written to a tensor file: a shape of rank 0 to 4 and
/// its elements in C order. `elements().len()` must equal the shape product.
pub trait TensorSource {
    fn shape(&self) -> Vec<usize>;
    fn elements(&self) -> SourceElements<'_>;
}

/// Element types that can back a `TensorSource`.
pub trait SourceElement: Clone + Send + Sync + 'static {
    fn wrap(values: Cow<'_, [Self]>) -> SourceElements<'_>;
}

macro_rules! impl_source_element {
    ($ty:ty, $variant:ident) => {
        impl SourceElement for $ty {
            fn wrap(values: Cow<'_, [Self]>) -> SourceElements<'_> {
                SourceElements::$variant(values)
            }
        }
    };
}

impl_source_element!(i32, Int32);
impl_source_element!(i64, Int64);
impl_source_element!(f32, Float32);
impl_source_element!(f64, Float64);

/// Result of converting source elements to a stored element type.
pub struct Converted {
    pub data: TensorData,
    /// Elements whose value changed in the conversion.
    pub lossy: usize,
}

impl SourceElements<'_> {
    pub fn len(&self) -> usize {
        match self {
            SourceElements::Int32(values) => values.len(),
            SourceElements::Int64(values) => values.len(),
            SourceElements::Float32(values) => values.len(),
            SourceElements::Float64(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Converts to `element_type`. Integers wrap, floats truncate toward zero
    /// when stored as `Int32`, wider values round when stored as `Float32`.
    pub fn convert(&self, element_type: ElementType, parallel: bool) -> Converted {
        match (self, element_type) {
            (SourceElements::Int32(values), ElementType::Int32) => Converted {
                data: TensorData::Int32(values.to_vec()),
                lossy: 0,
            },
            (SourceElements::Float32(values), ElementType::Float32) => Converted {
                data: TensorData::Float32(values.to_vec()),
                lossy: 0,
            },
            (SourceElements::Int32(values), ElementType::Float32) => {
                let (data, lossy) = convert_values(&values[..], parallel, |v| v as f32, |v| (v as f32) as f64 == v as f64);
                Converted { data: TensorData::Float32(data), lossy }
            }
            (SourceElements::Int64(values), ElementType::Int32) => {
                let (data, lossy) = convert_values(&values[..], parallel, |v| v as i32, |v| (v as i32) as i64 == v);
                Converted { data: TensorData::Int32(data), lossy }
            }
            (SourceElements::Int64(values), ElementType::Float32) => {
                let (data, lossy) = convert_values(&values[..], parallel, |v| v as f32, |v| (v as f32) as i128 == v as i128);
                Converted { data: TensorData::Float32(data), lossy }
            }
            (SourceElements::Float32(values), ElementType::Int32) => {
                let (data, lossy) = convert_values(&values[..], parallel, |v| v as i32, |v| (v as i32) as f64 == v as f64);
                Converted { data: TensorData::Int32(data), lossy }
            }
            (SourceElements::Float64(values), ElementType::Int32) => {
                let (data, lossy) = convert_values(&values[..], parallel, |v| v as i32, |v| (v as i32) as f64 == v);
                Converted { data: TensorData::Int32(data), lossy }
            }
            (SourceElements::Float64(values), ElementType::Float32) => {
                let (data, lossy) = convert_values(&values[..], parallel, |v| v as f32, |v: f64| v.is_nan() || (v as f32) as f64 == v);
                Converted { data: TensorData::Float32(data), lossy }
            }
        }
    }
}

fn convert_values<S, T>(values: &[S], parallel: bool, cast: fn(S) -> T, exact: fn(S) -> bool) -> (Vec<T>, usize)
where
    S: Copy + Send + Sync,
    T: Send,
{
    if parallel {
        let data = values.par_iter().map(|&v| cast(v)).collect();
        let lossy = values.par_iter().filter(|&&v| !exact(v)).count();
        (data, lossy)
    } else {
        let data = values.iter().map(|&v| cast(v)).collect();
        let lossy = values.iter().filter(|&&v| !exact(v)).count();
        (data, lossy)
    }
}

impl Tensor {
    /// Copies any source into an owned tensor of `element_type`, normalizing its shape.
    pub fn from_source(source: &dyn TensorSource, element_type: ElementType) -> Result<Tensor> {
        let desc = TensorDesc::from_shape(&source.shape())?;
        let converted = source.elements().convert(element_type, false);
        Tensor::from_parts(desc, converted.data)
    }
}

impl TensorSource for Tensor {
    fn shape(&self) -> Vec<usize> {
        Tensor::shape(self).to_vec()
    }

    fn elements(&self) -> SourceElements<'_> {
        match self.data() {
            TensorData::Int32(values) => SourceElements::Int32(Cow::Borrowed(values)),
            TensorData::Float32(values) => SourceElements::Float32(Cow::Borrowed(values)),
        }
    }
}

impl<S: TensorSource + ?Sized> TensorSource for &S {
    fn shape(&self) -> Vec<usize> {
        (**self).shape()
    }

    fn elements(&self) -> SourceElements<'_> {
        (**self).elements()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_conversions_report_no_loss() {
        let source = SourceElements::Int64(Cow::Owned(vec![1, -2, 3]));
        let converted = source.convert(ElementType::Int32, false);
        assert_eq!(converted.data, TensorData::Int32(vec![1, -2, 3]));
        assert_eq!(converted.lossy, 0);
    }

    #[test]
    fn wide_integers_wrap_and_are_counted() {
        let source = SourceElements::Int64(Cow::Owned(vec![1, (1i64 << 32) + 5]));
        let converted = source.convert(ElementType::Int32, false);
        assert_eq!(converted.data, TensorData::Int32(vec![1, 5]));
        assert_eq!(converted.lossy, 1);
    }

    #[test]
    fn fractional_floats_truncate() {
        let source = SourceElements::Float64(Cow::Owned(vec![1.5, -2.0, f64::NAN]));
        let converted = source.convert(ElementType::Int32, false);
        assert_eq!(converted.data, TensorData::Int32(vec![1, -2, 0]));
        assert_eq!(converted.lossy, 2);
    }

    #[test]
    fn large_ints_lose_float_precision() {
        let source = SourceElements::Int32(Cow::Owned(vec![16_777_217, 16]));
        let converted = source.convert(ElementType::Float32, false);
        assert_eq!(converted.lossy, 1);
    }

    #[test]
    fn parallel_matches_sequential() {
        let values: Vec<f64> = (0..10_000).map(|v| v as f64 * 0.1).collect();
        let source = SourceElements::Float64(Cow::Borrowed(&values[..]));
        let seq = source.convert(ElementType::Float32, false);
        let par = source.convert(ElementType::Float32, true);
        assert_eq!(seq.data, par.data);
        assert_eq!(seq.lossy, par.lossy);
    }
}
