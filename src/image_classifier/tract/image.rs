use crate::image_classifier::models::model_config::Normalization;
use image::{imageops, DynamicImage};
use tract_onnx::prelude::*;

/// Largest centered region with the target aspect ratio.
pub fn center_crop(image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    let (w, h) = (image.width() as u64, image.height() as u64);
    let (target_w, target_h) = (width as u64, height as u64);

    // Compare w/h against target_w/target_h without floats
    let (crop_w, crop_h) = if w * target_h > h * target_w {
        ((h * target_w / target_h).max(1), h)
    } else {
        (w, (w * target_h / target_w).max(1))
    };

    let x = (w - crop_w) / 2;
    let y = (h - crop_h) / 2;

    image.crop_imm(x as u32, y as u32, crop_w as u32, crop_h as u32)
}

pub fn resize_image(image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    let cropped = center_crop(image, width, height);
    if cropped.width() == width && cropped.height() == height {
        cropped
    } else {
        cropped.resize_exact(width, height, imageops::FilterType::Triangle)
    }
}

fn image_to_tensor(
    image: &DynamicImage,
    normalization: &Normalization,
) -> Result<Tensor, Box<dyn std::error::Error + Send + Sync>> {
    let rgb = image.to_rgb8();
    let (height, width) = (rgb.height() as usize, rgb.width() as usize);

    let array = tract_ndarray::Array4::from_shape_fn((1, 3, height, width), |(_, c, y, x)| {
        let pixel = rgb.get_pixel(x as u32, y as u32);
        (pixel[c] as f32 / 255.0 - normalization.mean[c]) / normalization.std[c]
    });

    Ok(array.into_tensor())
}

pub fn resize_image_to_tensor(
    image: &DynamicImage,
    width: u32,
    height: u32,
    normalization: &Normalization,
) -> Result<Tensor, Box<dyn std::error::Error + Send + Sync>> {
    if width == 0 || height == 0 {
        return Err("model input size must be non-zero".into());
    }
    if image.width() == 0 || image.height() == 0 {
        return Err("image is empty".into());
    }

    let resized = resize_image(image, width, height);
    let tensor = image_to_tensor(&resized, normalization)?;

    Ok(tensor)
}
