use std::path::Path;

use image::{GrayImage, Luma, Rgb, RgbImage};
use tracing::debug;

use crate::error::{Result, TensorFileError};
use crate::tensor::tensor::Tensor;
use crate::tensor::tensor_data::TensorData;

/// Writes a `[1, channels, height, width]` tensor as an image, channels being 1 or 3
/// planar slices. Values are rounded and clamped to `0..=255`; the format follows the
/// file extension.
pub fn save_image<P: AsRef<Path>>(path: P, tensor: &Tensor) -> Result<()> {
    let [outer, slices, rows, cols] = tensor.shape();
    if tensor.num_elements() == 0 {
        return Err(TensorFileError::InvalidShape("the tensor is empty, nothing to save".to_string()));
    }
    if outer != 1 {
        return Err(TensorFileError::InvalidShape(format!("the outer dimension must be 1, got {}", outer)));
    }

    let width = u32::try_from(cols).map_err(|_| TensorFileError::InvalidShape(format!("width {} too large", cols)))?;
    let height = u32::try_from(rows).map_err(|_| TensorFileError::InvalidShape(format!("height {} too large", rows)))?;
    let plane = rows * cols;
    let pixel = |channel: usize, x: u32, y: u32| -> u8 {
        let offset = channel * plane + y as usize * cols + x as usize;
        tensor.data().get(offset).map(|v| to_u8(v.as_f64())).unwrap_or(0)
    };

    let path = path.as_ref();
    match slices {
        1 => GrayImage::from_fn(width, height, |x, y| Luma([pixel(0, x, y)])).save(path)?,
        3 => RgbImage::from_fn(width, height, |x, y| Rgb([pixel(0, x, y), pixel(1, x, y), pixel(2, x, y)])).save(path)?,
        other => {
            return Err(TensorFileError::InvalidShape(format!(
                "the slice dimension must be 1 or 3, got {}",
                other
            )))
        }
    }

    debug!(path = %path.display(), width, height, channels = slices, "saved image");
    Ok(())
}

/// Reads an image as an `Int32` tensor of shape `[1, channels, height, width]`.
pub fn load_image<P: AsRef<Path>>(path: P, greyscale: bool) -> Result<Tensor> {
    let img = image::open(path.as_ref())?;
    let (width, height) = (img.width() as usize, img.height() as usize);

    if greyscale {
        let luma = img.to_luma8();
        let data: Vec<i32> = luma.pixels().map(|p| p.0[0] as i32).collect();
        return Tensor::new(&[1, 1, height, width], TensorData::Int32(data));
    }

    let rgb = img.to_rgb8();
    let plane = width * height;
    let mut data = vec![0i32; plane * 3];
    for (i, p) in rgb.pixels().enumerate() {
        for channel in 0..3 {
            data[channel * plane + i] = p.0[channel] as i32;
        }
    }
    Tensor::new(&[1, 3, height, width], TensorData::Int32(data))
}

fn to_u8(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
