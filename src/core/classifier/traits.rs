//! Trait definitions for classification strategies.

use super::Verdict;
use crate::core::similarity::SimilarityScore;
use crate::error::ConfigError;

/// Strategy for turning a similarity score into a verdict
pub trait ClassificationStrategy: Send + Sync {
    /// Determine if a score counts as a match
    fn is_match(&self, score: SimilarityScore) -> bool;

    /// Classify a score
    fn classify(&self, score: SimilarityScore) -> Verdict {
        if self.is_match(score) {
            Verdict::Match(score)
        } else {
            Verdict::NoMatch(score)
        }
    }

    /// Get the threshold used, as a percentage
    fn threshold(&self) -> f64;

    /// Human-readable description of the strategy
    fn description(&self) -> String;
}

/// Fixed-threshold strategy: strictly above the threshold is a match
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdStrategy {
    /// Percentage a score must exceed
    threshold: f64,
}

impl ThresholdStrategy {
    /// Default threshold percentage
    pub const DEFAULT_THRESHOLD: f64 = 85.0;

    /// Create a threshold strategy.
    ///
    /// The threshold must be a finite percentage in 0-100.
    pub fn new(threshold: f64) -> Result<Self, ConfigError> {
        if !threshold.is_finite() || !(0.0..=100.0).contains(&threshold) {
            return Err(ConfigError::InvalidThreshold { value: threshold });
        }
        Ok(Self { threshold })
    }
}

impl Default for ThresholdStrategy {
    fn default() -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }
}

impl ClassificationStrategy for ThresholdStrategy {
    fn is_match(&self, score: SimilarityScore) -> bool {
        score.value() > self.threshold
    }

    fn threshold(&self) -> f64 {
        self.threshold
    }

    fn description(&self) -> String {
        format!(
            "Threshold strategy: signatures scoring above {}% are considered a match",
            self.threshold
        )
    }
}
