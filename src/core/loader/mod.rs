//! # Loader Module
//!
//! Turns an image location into a [`NormalizedImage`]: a fixed-size,
//! single-channel intensity matrix that two signatures can be compared on.
//!
//! ## How It Works
//! 1. Read the file (memory-mapped for large files)
//! 2. Decode it, choosing a decoder from the file's magic bytes
//! 3. Turn it upright per its EXIF orientation
//! 4. Convert to BT.601 luma
//! 5. Resize to the canonical size, ignoring the source aspect ratio
//!
//! Every normalized image has exactly the loader's dimensions, whatever
//! the source size or aspect ratio.
//!
//! ## Example
//! ```rust,ignore
//! use signature_match::core::loader::ImageLoader;
//!
//! let loader = ImageLoader::new(300, 300);
//! let image = loader.load(&"sig_real.png".into())?;
//! assert_eq!(image.dimensions(), (300, 300));
//! ```

pub mod fast_decode;
pub mod fast_resize;
pub mod mmap_decode;
pub mod orientation;

pub use fast_decode::FastDecoder;
pub use fast_resize::{resize_to_grayscale, to_luma, FastResizer};
pub use orientation::Orientation;

use crate::core::source::ImageLocation;
use crate::error::{CompareError, ImageDecodeError};
use image::{DynamicImage, GrayImage};
use std::path::Path;

/// Default canonical width and height
pub const DEFAULT_SIZE: u32 = 300;

/// A decoded signature, converted to grayscale and resized to the canonical size
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedImage {
    pixels: GrayImage,
    source_dimensions: (u32, u32),
}

impl NormalizedImage {
    /// Wrap an already-normalized grayscale matrix.
    ///
    /// Fails unless it is exactly `expected` in size.
    pub fn from_gray(pixels: GrayImage, expected: (u32, u32)) -> Result<Self, CompareError> {
        if pixels.dimensions() != expected || expected.0 == 0 || expected.1 == 0 {
            let (width, height) = pixels.dimensions();
            return Err(CompareError::DimensionMismatch {
                left_width: width,
                left_height: height,
                right_width: expected.0,
                right_height: expected.1,
            });
        }

        Ok(Self {
            source_dimensions: pixels.dimensions(),
            pixels,
        })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Size of the image before normalization
    pub fn source_dimensions(&self) -> (u32, u32) {
        self.source_dimensions
    }

    pub fn pixels(&self) -> &GrayImage {
        &self.pixels
    }

    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }
}

/// Loads and normalizes images to a fixed canonical size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageLoader {
    width: u32,
    height: u32,
}

impl ImageLoader {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Read, decode and normalize the image at `location`
    pub fn load(&self, location: &ImageLocation) -> Result<NormalizedImage, ImageDecodeError> {
        let path = location.path();
        tracing::debug!(path = %location, "loading image");

        let decoded = FastDecoder::decode(path)?;
        let image = self.normalize_at(&decoded, path)?;

        tracing::debug!(
            path = %location,
            source_width = image.source_dimensions.0,
            source_height = image.source_dimensions.1,
            "image normalized"
        );

        Ok(image)
    }

    /// Normalize an image that is already in memory
    pub fn normalize(&self, image: &DynamicImage) -> Result<NormalizedImage, CompareError> {
        let pixels = resize_to_grayscale(image, self.width, self.height)?;
        Ok(NormalizedImage {
            pixels,
            source_dimensions: (image.width(), image.height()),
        })
    }

    fn normalize_at(
        &self,
        image: &DynamicImage,
        path: &Path,
    ) -> Result<NormalizedImage, ImageDecodeError> {
        self.normalize(image).map_err(|e| ImageDecodeError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE, DEFAULT_SIZE)
    }
}
