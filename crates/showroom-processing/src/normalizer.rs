//! Image normalizer: decode validation plus size-triggered resize/recompress.
//!
//! Policy: inputs at or under the size limit pass through byte-identical (no
//! re-encode, original format preserved). Oversized inputs are resized so
//! width ≤ the configured cap (aspect preserved, never upscaled) and
//! re-encoded as JPEG at a fixed quality. If the result still exceeds the
//! limit after that single pass, the operation fails closed with
//! [`NormalizeError::StillTooLarge`].
//!
//! Every input is decode-validated first, even on the pass-through path —
//! the declared MIME type can lie.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView, ImageReader};
use showroom_core::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("Not a decodable image: {0}")]
    Decode(String),

    #[error("Re-encode failed: {0}")]
    Encode(String),

    #[error("Image still exceeds {max} bytes after resize ({size} bytes)")]
    StillTooLarge { size: usize, max: usize },

    #[error("Normalization task failed: {0}")]
    Internal(String),
}

impl From<NormalizeError> for AppError {
    fn from(err: NormalizeError) -> Self {
        match err {
            NormalizeError::Decode(msg) => AppError::ImageDecode(msg),
            NormalizeError::StillTooLarge { size, max } => AppError::ImageTooLarge { size, max },
            NormalizeError::Encode(msg) | NormalizeError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Normalized upload bytes plus their content type.
#[derive(Clone, Debug)]
pub struct NormalizedImage {
    pub data: Vec<u8>,
    pub content_type: String,
}

/// Size/width policy for incoming images.
#[derive(Clone, Debug)]
pub struct ImageNormalizer {
    size_limit_bytes: usize,
    max_width_px: u32,
    jpeg_quality: u8,
}

impl ImageNormalizer {
    pub fn new(size_limit_bytes: usize, max_width_px: u32, jpeg_quality: u8) -> Self {
        Self {
            size_limit_bytes,
            max_width_px,
            jpeg_quality,
        }
    }

    /// Normalize on the current thread. CPU-bound; prefer
    /// [`Self::normalize_async`] from request handlers.
    pub fn normalize(
        &self,
        data: &[u8],
        declared_content_type: &str,
    ) -> Result<NormalizedImage, NormalizeError> {
        let img = decode(data)?;

        if data.len() <= self.size_limit_bytes {
            // Within budget: keep original bytes and format untouched.
            return Ok(NormalizedImage {
                data: data.to_vec(),
                content_type: declared_content_type.to_string(),
            });
        }

        let (width, height) = img.dimensions();
        let resized = if width > self.max_width_px {
            let new_height = ((height as u64 * self.max_width_px as u64) / width as u64).max(1);
            img.resize(
                self.max_width_px,
                new_height as u32,
                image::imageops::FilterType::Lanczos3,
            )
        } else {
            img
        };

        let encoded = encode_jpeg(&resized, self.jpeg_quality)?;

        tracing::debug!(
            original_bytes = data.len(),
            normalized_bytes = encoded.len(),
            original_width = width,
            "Image resized and re-encoded"
        );

        if encoded.len() > self.size_limit_bytes {
            return Err(NormalizeError::StillTooLarge {
                size: encoded.len(),
                max: self.size_limit_bytes,
            });
        }

        Ok(NormalizedImage {
            data: encoded,
            content_type: "image/jpeg".to_string(),
        })
    }

    /// Normalize on the blocking pool; takes an owned copy so the caller's
    /// buffer is never mutated.
    pub async fn normalize_async(
        &self,
        data: Vec<u8>,
        declared_content_type: String,
    ) -> Result<NormalizedImage, NormalizeError> {
        let normalizer = self.clone();
        tokio::task::spawn_blocking(move || normalizer.normalize(&data, &declared_content_type))
            .await
            .map_err(|e| NormalizeError::Internal(e.to_string()))?
    }
}

fn decode(data: &[u8]) -> Result<DynamicImage, NormalizeError> {
    ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| NormalizeError::Decode(e.to_string()))?
        .decode()
        .map_err(|e| NormalizeError::Decode(e.to_string()))
}

fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, NormalizeError> {
    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut buffer), quality);
    // JPEG has no alpha channel; flatten first.
    img.to_rgb8()
        .write_with_encoder(encoder)
        .map_err(|e| NormalizeError::Encode(e.to_string()))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};

    /// Deterministic "noisy" PNG; noise defeats PNG compression so the file
    /// size scales with pixel count.
    fn noisy_png(width: u32, height: u32) -> Vec<u8> {
        let mut seed: u32 = 0x9e3779b9;
        let img = RgbaImage::from_fn(width, height, |x, y| {
            seed = seed
                .wrapping_mul(1664525)
                .wrapping_add(1013904223)
                .wrapping_add(x ^ y);
            let b = seed.to_le_bytes();
            Rgba([b[0], b[1], b[2], 255])
        });
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        buffer
    }

    fn decoded_dimensions(data: &[u8]) -> (u32, u32) {
        decode(data).unwrap().dimensions()
    }

    #[test]
    fn small_images_pass_through_unchanged() {
        let png = noisy_png(40, 40);
        let normalizer = ImageNormalizer::new(10 * 1024 * 1024, 1200, 80);

        let out = normalizer.normalize(&png, "image/png").unwrap();
        assert_eq!(out.data, png);
        assert_eq!(out.content_type, "image/png");
    }

    #[test]
    fn oversized_images_are_resized_and_bounded() {
        let png = noisy_png(400, 200);
        let limit = 10 * 1024;
        assert!(png.len() > limit, "fixture must exceed the limit");

        let normalizer = ImageNormalizer::new(limit, 50, 80);
        let out = normalizer.normalize(&png, "image/png").unwrap();

        assert!(out.data.len() <= limit);
        assert_eq!(out.content_type, "image/jpeg");
        let (w, h) = decoded_dimensions(&out.data);
        assert_eq!(w, 50);
        assert_eq!(h, 25);
    }

    #[test]
    fn never_upscales_narrow_images() {
        let png = noisy_png(100, 100);
        let limit = 10 * 1024;
        assert!(png.len() > limit);

        let normalizer = ImageNormalizer::new(limit, 1200, 80);
        let out = normalizer.normalize(&png, "image/png").unwrap();

        let (w, h) = decoded_dimensions(&out.data);
        assert_eq!((w, h), (100, 100));
    }

    #[test]
    fn fails_closed_when_still_too_large() {
        let png = noisy_png(400, 200);
        // Nothing fits in 16 bytes; the single resize+compress pass must
        // surface StillTooLarge instead of silently exceeding the limit.
        let normalizer = ImageNormalizer::new(16, 50, 80);
        let err = normalizer.normalize(&png, "image/png").unwrap_err();
        assert!(matches!(err, NormalizeError::StillTooLarge { .. }));
    }

    #[test]
    fn spoofed_mime_is_caught_by_decode() {
        let not_an_image = b"plain text pretending to be a jpeg".to_vec();
        let normalizer = ImageNormalizer::new(10 * 1024 * 1024, 1200, 80);
        let err = normalizer
            .normalize(&not_an_image, "image/jpeg")
            .unwrap_err();
        assert!(matches!(err, NormalizeError::Decode(_)));
    }

    #[test]
    fn caller_buffer_is_not_mutated() {
        let png = noisy_png(400, 200);
        let before = png.clone();
        let normalizer = ImageNormalizer::new(10 * 1024, 50, 80);
        let _ = normalizer.normalize(&png, "image/png").unwrap();
        assert_eq!(png, before);
    }

    #[tokio::test]
    async fn async_wrapper_matches_sync_result() {
        let png = noisy_png(40, 40);
        let normalizer = ImageNormalizer::new(10 * 1024 * 1024, 1200, 80);
        let out = normalizer
            .normalize_async(png.clone(), "image/png".to_string())
            .await
            .unwrap();
        assert_eq!(out.data, png);
    }
}
