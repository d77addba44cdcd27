//! Test fixtures: images generated in memory.

use image::{DynamicImage, GenericImageView, Rgb, RgbImage, Rgba, RgbaImage};
use imgdrop_core::AllowedType;
use imgdrop_processing::ImageCompressor;

/// Xorshift noise; incompressible, so encoded size tracks pixel count.
pub fn noise_rgb(width: u32, height: u32, seed: u32) -> DynamicImage {
    let mut state = seed.max(1);
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |_, _| {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let [r, g, b, _] = state.to_le_bytes();
        Rgb([r, g, b])
    }))
}

/// Smooth gradient with alpha; compresses well.
pub fn gradient_rgba(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255 - (x % 128) as u8])
    }))
}

/// Encode `img` the way the pipeline would for `allowed`.
pub fn encode(img: &DynamicImage, allowed: AllowedType) -> Vec<u8> {
    let img = ImageCompressor::prepare(img.clone(), allowed.profile());
    ImageCompressor::encode(&img, allowed.profile()).expect("Failed to encode fixture")
}

pub fn noise_jpeg(width: u32, height: u32) -> Vec<u8> {
    encode(&noise_rgb(width, height, 7), AllowedType::Jpeg)
}

pub fn noise_png(width: u32, height: u32) -> Vec<u8> {
    encode(&noise_rgb(width, height, 11), AllowedType::Png)
}

/// Decode stored bytes and return their dimensions.
pub fn dimensions(data: &[u8], allowed: AllowedType) -> (u32, u32) {
    ImageCompressor::decode(data, allowed)
        .expect("Stored bytes should decode")
        .dimensions()
}
