//! # Similarity Module
//!
//! Scores how alike two normalized signatures are.
//!
//! ## How It Works
//! 1. Slide a 7x7 window across both images
//! 2. In each window, combine luminance, contrast and structure agreement
//! 3. Average over every window fully inside the image (mean SSIM, -1 to 1)
//! 4. Scale to a percentage and round to two decimals
//!
//! | Score    | Typical meaning                  |
//! |----------|----------------------------------|
//! | 100.00   | Same pixels                      |
//! | 90-99    | Same signature, rescanned        |
//! | below 85 | Different or heavily altered     |
//! | ~0       | Unrelated (e.g. black vs white)  |

mod ssim;

pub use ssim::mean_ssim;

use crate::core::loader::NormalizedImage;
use crate::error::{CompareError, ConfigError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Parameters of the windowed SSIM statistic
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SsimParams {
    /// Side length of the square sliding window (odd)
    pub window: u32,
    /// Luminance stability constant
    pub k1: f64,
    /// Contrast stability constant
    pub k2: f64,
    /// Dynamic range of pixel values
    pub data_range: f64,
    /// Normalize variances by N-1 instead of N
    pub sample_covariance: bool,
}

impl Default for SsimParams {
    fn default() -> Self {
        Self {
            window: 7,
            k1: 0.01,
            k2: 0.03,
            data_range: 255.0,
            sample_covariance: true,
        }
    }
}

impl SsimParams {
    /// Check the parameters against the canonical image size
    pub fn validate(&self, width: u32, height: u32) -> Result<(), ConfigError> {
        if self.window < 3 || self.window % 2 == 0 || self.window > width || self.window > height {
            return Err(ConfigError::InvalidWindow {
                window: self.window,
                width,
                height,
            });
        }
        for (name, value) in [("k1", self.k1), ("k2", self.k2), ("data_range", self.data_range)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidConstant { name, value });
            }
        }
        Ok(())
    }
}

/// Percentage structural similarity, rounded to two decimal places
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimilarityScore(f64);

impl SimilarityScore {
    /// Scale a mean SSIM value to a percentage and round it
    pub fn from_ssim(mean_ssim: f64) -> Self {
        Self(round_hundredths(mean_ssim * 100.0))
    }

    /// Round an arbitrary percentage to a score
    pub fn from_percent(percent: f64) -> Self {
        Self(round_hundredths(percent))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for SimilarityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Round to two decimals through the printed decimal form
fn round_hundredths(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Computes similarity scores between normalized images
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityScorer {
    params: SsimParams,
}

impl SimilarityScorer {
    pub fn new(params: SsimParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &SsimParams {
        &self.params
    }

    /// Raw mean SSIM in [-1, 1]
    pub fn mean_ssim(&self, a: &NormalizedImage, b: &NormalizedImage) -> Result<f64, CompareError> {
        mean_ssim(a.pixels(), b.pixels(), &self.params)
    }

    /// Percentage score, rounded
    pub fn score(
        &self,
        a: &NormalizedImage,
        b: &NormalizedImage,
    ) -> Result<SimilarityScore, CompareError> {
        let raw = self.mean_ssim(a, b)?;
        let score = SimilarityScore::from_ssim(raw);
        tracing::debug!(raw_ssim = raw, score = score.value(), "similarity computed");
        Ok(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    fn normalized(pixels: GrayImage) -> NormalizedImage {
        let dims = pixels.dimensions();
        NormalizedImage::from_gray(pixels, dims).unwrap()
    }

    #[test]
    fn score_rounds_to_two_decimals() {
        assert_eq!(SimilarityScore::from_ssim(0.873456).value(), 87.35);
        assert_eq!(SimilarityScore::from_ssim(1.0).value(), 100.0);
        assert_eq!(SimilarityScore::from_percent(85.0049).value(), 85.0);
        assert_eq!(SimilarityScore::from_percent(85.0051).value(), 85.01);
    }

    #[test]
    fn score_display_has_two_decimals() {
        assert_eq!(SimilarityScore::from_percent(87.5).to_string(), "87.50");
        assert_eq!(SimilarityScore::from_ssim(1.0).to_string(), "100.00");
    }

    #[test]
    fn negative_scores_are_kept() {
        assert_eq!(SimilarityScore::from_ssim(-0.25).value(), -25.0);
    }

    #[test]
    fn scorer_gives_100_for_identical_images() {
        let image = normalized(GrayImage::from_fn(30, 30, |x, y| Luma([(x * y % 256) as u8])));
        let score = SimilarityScorer::default().score(&image, &image).unwrap();
        assert_eq!(score.value(), 100.0);
    }

    #[test]
    fn scorer_is_deterministic() {
        let a = normalized(GrayImage::from_fn(60, 60, |x, y| Luma([((x + 2 * y) % 256) as u8])));
        let b = normalized(GrayImage::from_fn(60, 60, |x, y| Luma([((3 * x + y) % 256) as u8])));
        let scorer = SimilarityScorer::default();

        let first = scorer.score(&a, &b).unwrap();
        let second = scorer.score(&a, &b).unwrap();
        assert_eq!(first.value().to_bits(), second.value().to_bits());
    }

    #[test]
    fn default_params_validate_for_canonical_size() {
        assert!(SsimParams::default().validate(300, 300).is_ok());
    }

    #[test]
    fn invalid_params_are_rejected() {
        let even = SsimParams {
            window: 8,
            ..SsimParams::default()
        };
        assert!(matches!(even.validate(300, 300), Err(ConfigError::InvalidWindow { .. })));

        let too_big = SsimParams {
            window: 11,
            ..SsimParams::default()
        };
        assert!(too_big.validate(10, 300).is_err());

        let bad_k = SsimParams {
            k2: 0.0,
            ..SsimParams::default()
        };
        assert!(matches!(
            bad_k.validate(300, 300),
            Err(ConfigError::InvalidConstant { name: "k2", .. })
        ));
    }
}
