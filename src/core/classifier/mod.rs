//! # Classifier Module
//!
//! Maps a similarity score to a match / no-match verdict.
//!
//! ## Rule
//! A score strictly greater than the threshold (default 85) is a match.
//! A score equal to the threshold is not. Scores are rounded to two
//! decimals before this comparison, so 85.004 counts as 85.00.

mod traits;

pub use traits::{ClassificationStrategy, ThresholdStrategy};

use crate::core::similarity::SimilarityScore;
use serde::{Deserialize, Serialize};

/// Outcome of comparing two signatures
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "verdict", content = "score")]
pub enum Verdict {
    /// Similar enough to be the same signature
    Match(SimilarityScore),
    /// Not similar enough
    NoMatch(SimilarityScore),
}

impl Verdict {
    /// The score that produced this verdict
    pub fn score(&self) -> SimilarityScore {
        match self {
            Verdict::Match(score) | Verdict::NoMatch(score) => *score,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Verdict::Match(_))
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Match(score) => write!(f, "Match ({}%)", score),
            Verdict::NoMatch(score) => write!(f, "No Match ({}%)", score),
        }
    }
}
