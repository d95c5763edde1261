//! Grayscale conversion and fast SIMD-accelerated resizing.
//!
//! Uses fast_image_resize, which picks AVX2/NEON kernels when available.

use crate::error::CompareError;
use fast_image_resize::{images::Image, FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::{DynamicImage, GrayImage, ImageBuffer, Luma};

// BT.601 luma weights in 14-bit fixed point (0.299, 0.587, 0.114).
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_SHIFT: u32 = 14;
const LUMA_ROUND: u32 = 1 << (LUMA_SHIFT - 1);

/// Convert any decoded image to 8-bit single-channel intensity.
///
/// Alpha is dropped and 16-bit/float images are scaled to 8 bits first.
/// Grayscale input passes through unchanged.
pub fn to_luma(image: &DynamicImage) -> GrayImage {
    if let DynamicImage::ImageLuma8(gray) = image {
        return gray.clone();
    }

    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    let mut gray = GrayImage::new(width, height);

    for (dst, src) in gray.pixels_mut().zip(rgb.pixels()) {
        let [r, g, b] = src.0;
        let y = (r as u32 * LUMA_R + g as u32 * LUMA_G + b as u32 * LUMA_B + LUMA_ROUND)
            >> LUMA_SHIFT;
        *dst = Luma([y as u8]);
    }

    gray
}

/// Reusable grayscale resizer
pub struct FastResizer {
    resizer: Resizer,
}

impl FastResizer {
    pub fn new() -> Self {
        Self {
            resizer: Resizer::new(),
        }
    }

    /// Resize a grayscale image to exactly `width` x `height`.
    ///
    /// Aspect ratio is not preserved. Bilinear interpolation samples the
    /// source at pixel centres without widening the kernel on downscale.
    pub fn resize(
        &mut self,
        gray: &GrayImage,
        width: u32,
        height: u32,
    ) -> Result<GrayImage, CompareError> {
        let (src_width, src_height) = gray.dimensions();

        if src_width == 0 || src_height == 0 {
            return Err(CompareError::Normalization(
                "Invalid source dimensions".to_string(),
            ));
        }

        if width == 0 || height == 0 {
            return Err(CompareError::Normalization(
                "Invalid destination dimensions".to_string(),
            ));
        }

        if (src_width, src_height) == (width, height) {
            return Ok(gray.clone());
        }

        let src_image = Image::from_vec_u8(src_width, src_height, gray.as_raw().clone(), PixelType::U8)
            .map_err(|e| {
                CompareError::Normalization(format!("Failed to create source image: {}", e))
            })?;

        let mut dst_image = Image::new(width, height, PixelType::U8);

        let options =
            ResizeOptions::new().resize_alg(ResizeAlg::Interpolation(FilterType::Bilinear));

        self.resizer
            .resize(&src_image, &mut dst_image, &options)
            .map_err(|e| CompareError::Normalization(format!("Resize failed: {}", e)))?;

        let result: ImageBuffer<Luma<u8>, Vec<u8>> =
            ImageBuffer::from_raw(width, height, dst_image.into_vec()).ok_or_else(|| {
                CompareError::Normalization("Failed to create result buffer".to_string())
            })?;

        Ok(result)
    }
}

impl Default for FastResizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert to grayscale and resize in one step
pub fn resize_to_grayscale(
    image: &DynamicImage,
    width: u32,
    height: u32,
) -> Result<GrayImage, CompareError> {
    let gray = to_luma(image);
    FastResizer::new().resize(&gray, width, height)
}
