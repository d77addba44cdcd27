use crate::reencoder::ReencodeError;
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::{DynamicImage, GenericImageView, ImageFormat};
use imgdrop_core::{AllowedType, EncoderId, EncoderProfile};

/// Decoder format for a declared type. Bytes are never sniffed.
pub fn image_format(allowed: AllowedType) -> ImageFormat {
    match allowed {
        AllowedType::Jpeg => ImageFormat::Jpeg,
        AllowedType::Png => ImageFormat::Png,
        AllowedType::WebP => ImageFormat::WebP,
    }
}

/// Image compressor driven by an [`EncoderProfile`]
pub struct ImageCompressor;

impl ImageCompressor {
    /// Decode `data` as the declared type.
    pub fn decode(data: &[u8], allowed: AllowedType) -> Result<DynamicImage, ReencodeError> {
        image::load_from_memory_with_format(data, image_format(allowed))
            .map_err(|e| ReencodeError::Decode(e.to_string()))
    }

    /// Convert to the color model the profile's encoder accepts.
    ///
    /// Only JPEG needs this; other profiles pass the image through untouched.
    pub fn prepare(img: DynamicImage, profile: &EncoderProfile) -> DynamicImage {
        if profile.requires_rgb && !matches!(img, DynamicImage::ImageRgb8(_)) {
            DynamicImage::ImageRgb8(img.to_rgb8())
        } else {
            img
        }
    }

    /// Encode with the profile's encoder and settings.
    pub fn encode(img: &DynamicImage, profile: &EncoderProfile) -> Result<Vec<u8>, ReencodeError> {
        match profile.encoder {
            EncoderId::Jpeg => Self::compress_jpeg(img, profile),
            EncoderId::Png => Self::compress_png(img, profile),
            EncoderId::WebP => Self::compress_webp(img, profile),
        }
    }

    /// Compress to JPEG using mozjpeg
    fn compress_jpeg(img: &DynamicImage, profile: &EncoderProfile) -> Result<Vec<u8>, ReencodeError> {
        let rgb_img = img.to_rgb8();
        let (width, height) = rgb_img.dimensions();

        let mut comp = mozjpeg::Compress::new(mozjpeg::ColorSpace::JCS_RGB);
        comp.set_size(width as usize, height as usize);
        comp.set_quality(profile.quality.unwrap_or(85) as f32);
        if profile.progressive {
            comp.set_progressive_mode();
        }
        comp.set_optimize_coding(profile.optimize_coding);

        let encode_err = |e: std::io::Error| ReencodeError::Encode(format!("JPEG: {}", e));
        let mut comp = comp.start_compress(Vec::new()).map_err(encode_err)?;
        comp.write_scanlines(&rgb_img).map_err(encode_err)?;
        comp.finish().map_err(encode_err)
    }

    /// Compress to PNG (lossless)
    fn compress_png(img: &DynamicImage, profile: &EncoderProfile) -> Result<Vec<u8>, ReencodeError> {
        let compression = match profile.effort {
            0..=3 => CompressionType::Fast,
            4..=8 => CompressionType::Default,
            _ => CompressionType::Best,
        };

        let mut buffer = Vec::new();
        let encoder = PngEncoder::new_with_quality(&mut buffer, compression, PngFilterType::Adaptive);
        img.write_with_encoder(encoder)
            .map_err(|e| ReencodeError::Encode(format!("PNG: {}", e)))?;

        Ok(buffer)
    }

    /// Compress to WebP (lossy, alpha kept when present)
    fn compress_webp(img: &DynamicImage, profile: &EncoderProfile) -> Result<Vec<u8>, ReencodeError> {
        let (width, height) = img.dimensions();

        if img.color().has_alpha() {
            let rgba_img = img.to_rgba8();
            Self::webp_with_profile(webp::Encoder::from_rgba(&rgba_img, width, height), profile)
        } else {
            let rgb_img = img.to_rgb8();
            Self::webp_with_profile(webp::Encoder::from_rgb(&rgb_img, width, height), profile)
        }
    }

    fn webp_with_profile(
        encoder: webp::Encoder<'_>,
        profile: &EncoderProfile,
    ) -> Result<Vec<u8>, ReencodeError> {
        let mut config = webp::WebPConfig::new()
            .map_err(|_| ReencodeError::Encode("WebP: failed to initialize config".to_string()))?;
        config.lossless = 0;
        config.quality = profile.quality.unwrap_or(85) as f32;
        config.method = profile.effort as i32;

        let webp_data = encoder
            .encode_advanced(&config)
            .map_err(|e| ReencodeError::Encode(format!("WebP: {:?}", e)))?;

        Ok(webp_data.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn gradient_rgb(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        }))
    }

    fn translucent_rgba(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, 64, (y % 256) as u8, 128])
        }))
    }

    #[test]
    fn test_jpeg_encode_decodes_back() {
        let img = gradient_rgb(64, 48);
        let data = ImageCompressor::encode(&img, AllowedType::Jpeg.profile()).unwrap();

        let decoded = ImageCompressor::decode(&data, AllowedType::Jpeg).unwrap();
        assert_eq!(decoded.dimensions(), (64, 48));
    }

    #[test]
    fn test_png_encode_is_lossless() {
        let img = gradient_rgb(40, 30);
        let data = ImageCompressor::encode(&img, AllowedType::Png.profile()).unwrap();

        let decoded = ImageCompressor::decode(&data, AllowedType::Png).unwrap();
        assert_eq!(decoded.to_rgb8(), img.to_rgb8());
    }

    #[test]
    fn test_webp_encode_keeps_alpha() {
        let img = translucent_rgba(32, 32);
        let data = ImageCompressor::encode(&img, AllowedType::WebP.profile()).unwrap();

        let decoded = ImageCompressor::decode(&data, AllowedType::WebP).unwrap();
        assert_eq!(decoded.dimensions(), (32, 32));
        assert!(decoded.color().has_alpha());
    }

    #[test]
    fn test_prepare_converts_alpha_for_jpeg_only() {
        let jpeg = ImageCompressor::prepare(translucent_rgba(8, 8), AllowedType::Jpeg.profile());
        assert!(matches!(jpeg, DynamicImage::ImageRgb8(_)));

        let png = ImageCompressor::prepare(translucent_rgba(8, 8), AllowedType::Png.profile());
        assert!(matches!(png, DynamicImage::ImageRgba8(_)));
    }

    #[test]
    fn test_decode_uses_declared_format() {
        let png = ImageCompressor::encode(&gradient_rgb(8, 8), AllowedType::Png.profile()).unwrap();

        assert!(ImageCompressor::decode(&png, AllowedType::Png).is_ok());
        assert!(matches!(
            ImageCompressor::decode(&png, AllowedType::Jpeg),
            Err(ReencodeError::Decode(_))
        ));
    }
}
