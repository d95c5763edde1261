//! Fast image decoding with format-specific optimizations.
//!
//! Uses zune-jpeg for JPEG data (1.5-2x faster than image crate),
//! falls back to image crate for everything else. Either way the result
//! is turned upright according to its EXIF orientation.

use super::mmap_decode::{read_file_bytes, sniff_format, SniffedFormat};
use super::orientation::Orientation;
use crate::error::ImageDecodeError;
use image::{DynamicImage, ImageBuffer, Luma, Rgb, Rgba};
use std::path::Path;
use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;
use zune_jpeg::JpegDecoder;

/// Fast image decoder that picks a decoder from the file's magic bytes
pub struct FastDecoder;

impl FastDecoder {
    /// Read and decode an image file.
    ///
    /// Fails with `Empty` for zero-byte files and zero-sized rasters, so a
    /// successfully decoded image always has pixels. The returned image is
    /// upright as the file's EXIF orientation says it should be displayed.
    pub fn decode(path: &Path) -> Result<DynamicImage, ImageDecodeError> {
        let bytes = read_file_bytes(path)?;
        if bytes.is_empty() {
            return Err(ImageDecodeError::Empty {
                path: path.to_path_buf(),
            });
        }

        let image = match sniff_format(&bytes) {
            SniffedFormat::Jpeg => Self::decode_jpeg(path, &bytes).or_else(|e| {
                tracing::debug!(path = %path.display(), error = %e, "zune-jpeg failed, retrying with image crate");
                Self::decode_fallback(path, &bytes)
            })?,
            SniffedFormat::Png | SniffedFormat::Other => Self::decode_fallback(path, &bytes)?,
        };

        if image.width() == 0 || image.height() == 0 {
            return Err(ImageDecodeError::Empty {
                path: path.to_path_buf(),
            });
        }

        let orientation = Orientation::read(&bytes);
        if orientation != Orientation::Normal {
            tracing::debug!(path = %path.display(), ?orientation, "applying EXIF orientation");
        }
        Ok(orientation.apply(image))
    }

    fn decode_jpeg(path: &Path, bytes: &[u8]) -> Result<DynamicImage, ImageDecodeError> {
        let options = DecoderOptions::new_fast().jpeg_set_out_colorspace(ColorSpace::RGB);
        let mut decoder = JpegDecoder::new_with_options(bytes, options);

        let pixels = decoder.decode().map_err(|e| ImageDecodeError::Decode {
            path: path.to_path_buf(),
            reason: format!("zune-jpeg decode failed: {:?}", e),
        })?;

        let info = decoder.info().ok_or_else(|| ImageDecodeError::Decode {
            path: path.to_path_buf(),
            reason: "Failed to get image info".to_string(),
        })?;

        let width = info.width as u32;
        let height = info.height as u32;

        let out_colorspace = decoder.get_output_colorspace().unwrap_or(ColorSpace::RGB);

        let image = match out_colorspace {
            ColorSpace::RGB => {
                let buffer: ImageBuffer<Rgb<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(width, height, pixels)
                        .ok_or_else(|| Self::buffer_error(path, "RGB"))?;
                DynamicImage::ImageRgb8(buffer)
            }
            ColorSpace::RGBA => {
                let buffer: ImageBuffer<Rgba<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(width, height, pixels)
                        .ok_or_else(|| Self::buffer_error(path, "RGBA"))?;
                DynamicImage::ImageRgba8(buffer)
            }
            ColorSpace::Luma => {
                let buffer: ImageBuffer<Luma<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(width, height, pixels)
                        .ok_or_else(|| Self::buffer_error(path, "Luma"))?;
                DynamicImage::ImageLuma8(buffer)
            }
            other => {
                return Err(ImageDecodeError::Decode {
                    path: path.to_path_buf(),
                    reason: format!("Unsupported JPEG output colorspace {:?}", other),
                });
            }
        };

        Ok(image)
    }

    fn decode_fallback(path: &Path, bytes: &[u8]) -> Result<DynamicImage, ImageDecodeError> {
        image::load_from_memory(bytes).map_err(|e| ImageDecodeError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    fn buffer_error(path: &Path, kind: &str) -> ImageDecodeError {
        ImageDecodeError::Decode {
            path: path.to_path_buf(),
            reason: format!("Failed to create {} buffer", kind),
        }
    }
}
