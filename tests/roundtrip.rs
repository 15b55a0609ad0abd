use ndarray::{Array, Array2, IxDyn};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tensorfile::{
    decode_bytes, encode_tensor, encode_tensors, normalize, CodecConfig, Container, ElementType, Tensor,
    TensorData, TensorFileError, TensorSource,
};

fn config(element_type: ElementType) -> CodecConfig {
    CodecConfig::default().with_element_type(element_type)
}

fn random_tensor(rng: &mut StdRng, shape: &[usize], element_type: ElementType) -> Tensor {
    let len: usize = shape.iter().product();
    let data = match element_type {
        ElementType::Int32 => TensorData::Int32((0..len).map(|_| rng.gen()).collect()),
        ElementType::Float32 => TensorData::Float32((0..len).map(|_| rng.gen_range(-1e6f32..1e6)).collect()),
    };
    Tensor::new(shape, data).unwrap()
}

#[test]
fn every_rank_roundtrips_for_both_types() {
    let mut rng = StdRng::seed_from_u64(727);
    let shapes: [&[usize]; 5] = [&[], &[7], &[4, 3], &[2, 3, 4], &[2, 1, 3, 2]];

    for element_type in [ElementType::Int32, ElementType::Float32] {
        for shape in shapes {
            let t = random_tensor(&mut rng, shape, element_type);
            let bytes = encode_tensor(&t, &config(element_type)).unwrap();
            let decoded = decode_bytes(&bytes, &config(element_type)).unwrap().into_first().unwrap();

            assert_eq!(decoded.shape(), normalize(shape).unwrap());
            assert_eq!(decoded.element_type(), element_type);
            assert_eq!(decoded, t);
        }
    }
}

#[test]
fn rank_two_is_padded_to_four() {
    let a = Array2::<i32>::zeros((4, 3));
    let bytes = encode_tensor(&a, &config(ElementType::Int32)).unwrap();
    let decoded = decode_bytes(&bytes, &config(ElementType::Int32)).unwrap();
    match decoded {
        Container::Single(t) => assert_eq!(t.shape(), [1, 1, 4, 3]),
        other => panic!("expected a single tensor, got {:?}", other),
    }
}

#[test]
fn multi_keeps_order_and_shapes() {
    let a = Array::from_shape_vec(IxDyn(&[2, 3]), (0..6).collect::<Vec<i32>>()).unwrap();
    let b = Array::from_shape_vec(IxDyn(&[5, 1, 2, 2]), (100..120).collect::<Vec<i32>>()).unwrap();
    let sources: [&dyn TensorSource; 2] = [&a, &b];

    let bytes = encode_tensors(&sources, &config(ElementType::Int32)).unwrap();
    let decoded = decode_bytes(&bytes, &config(ElementType::Int32)).unwrap();

    assert_eq!(decoded.element_type(), ElementType::Int32);
    let tensors = decoded.into_tensors();
    assert_eq!(tensors.len(), 2);
    assert_eq!(tensors[0].shape(), [1, 1, 2, 3]);
    assert_eq!(tensors[1].shape(), [5, 1, 2, 2]);
    assert_eq!(tensors[0].as_i32().unwrap(), a.as_slice().unwrap());
    assert_eq!(tensors[1].as_i32().unwrap(), b.as_slice().unwrap());
}

#[test]
fn arange_120_keeps_values_in_place() {
    let c = Array::from_iter(0..120i64).into_shape_with_order((5, 4, 2, 3)).unwrap();
    let bytes = encode_tensor(&c, &config(ElementType::Int32)).unwrap();
    let p = decode_bytes(&bytes, &config(ElementType::Int32)).unwrap().into_first().unwrap();

    assert_eq!(p.shape(), [5, 4, 2, 3]);
    let a = p.to_array::<i32>().unwrap();
    for ((g, s, r, col), &value) in a.indexed_iter() {
        assert_eq!(value as usize, col + 3 * r + 6 * s + 24 * g);
    }
}

#[test]
fn rank_five_is_rejected() {
    let a = Array::<f32, _>::zeros(IxDyn(&[1, 2, 1, 2, 1]));
    let result = encode_tensor(&a, &config(ElementType::Float32));
    assert!(matches!(result, Err(TensorFileError::Rank { rank: 5 })));
}

#[test]
fn rank_five_in_a_group_aborts_the_whole_encode() {
    let ok = Tensor::arange(&[3], ElementType::Int32).unwrap();
    let bad = Array::<i32, _>::zeros(IxDyn(&[1, 1, 1, 1, 1]));
    let result = encode_tensors(&[&ok, &bad], &config(ElementType::Int32));
    assert!(matches!(result, Err(TensorFileError::Rank { .. })));
}

#[test]
fn type_id_zero_is_unsupported() {
    let t = Tensor::arange(&[2, 2], ElementType::Int32).unwrap();
    let mut bytes = encode_tensor(&t, &config(ElementType::Int32)).unwrap();
    bytes[12..16].copy_from_slice(&0i32.to_le_bytes());
    let result = decode_bytes(&bytes, &CodecConfig::default());
    assert!(matches!(result, Err(TensorFileError::UnsupportedType(_))));
}

#[test]
fn dropping_the_last_element_is_truncation() {
    for element_type in [ElementType::Int32, ElementType::Float32] {
        let t = Tensor::arange(&[5, 4, 2, 3], element_type).unwrap();
        let bytes = encode_tensor(&t, &config(element_type)).unwrap();
        let result = decode_bytes(&bytes[..bytes.len() - 4], &config(element_type));
        assert!(matches!(result, Err(TensorFileError::TruncatedStream { .. })));
    }
}

#[test]
fn zero_sized_tensors_roundtrip() {
    let t = Tensor::new(&[0, 3], TensorData::Float32(Vec::new())).unwrap();
    let bytes = encode_tensor(&t, &CodecConfig::default()).unwrap();
    assert_eq!(bytes.len(), 32);
    let decoded = decode_bytes(&bytes, &CodecConfig::default()).unwrap().into_first().unwrap();
    assert_eq!(decoded.shape(), [1, 1, 0, 3]);
    assert_eq!(decoded.num_elements(), 0);
}

#[test]
fn parallel_path_gives_identical_bytes() {
    let mut rng = StdRng::seed_from_u64(42);
    let t = random_tensor(&mut rng, &[3, 4, 50, 50], ElementType::Float32);
    let sequential = CodecConfig {
        parallel_threshold: usize::MAX,
        ..Default::default()
    };
    let parallel = CodecConfig {
        parallel_threshold: 1,
        ..Default::default()
    };

    let a = encode_tensor(&t, &sequential).unwrap();
    let b = encode_tensor(&t, &parallel).unwrap();
    assert_eq!(a, b);
    assert_eq!(decode_bytes(&b, &parallel).unwrap().into_first().unwrap(), t);
}

fn shape_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..5, 0..=4)
}

proptest! {
    #[test]
    fn int_tensors_roundtrip(shape in shape_strategy(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let t = random_tensor(&mut rng, &shape, ElementType::Int32);
        let bytes = encode_tensor(&t, &config(ElementType::Int32)).unwrap();
        let decoded = decode_bytes(&bytes, &config(ElementType::Int32)).unwrap();
        prop_assert_eq!(decoded, Container::Single(t));
    }

    #[test]
    fn float_groups_roundtrip(shapes in prop::collection::vec(shape_strategy(), 0..4), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let tensors: Vec<Tensor> = shapes
            .iter()
            .map(|shape| random_tensor(&mut rng, shape, ElementType::Float32))
            .collect();
        let sources: Vec<&dyn TensorSource> = tensors.iter().map(|t| t as &dyn TensorSource).collect();

        let bytes = encode_tensors(&sources, &config(ElementType::Float32)).unwrap();
        let decoded = decode_bytes(&bytes, &config(ElementType::Float32)).unwrap();
        prop_assert_eq!(decoded.into_tensors(), tensors);
    }
}
