//! # Reporter Module
//!
//! Turns a comparison into something a person can act on.
//!
//! ## Report Levels
//! 1. **Verdict**: match or no match, with the score and threshold
//! 2. **Explanation**: dialog-ready title and message
//! 3. **Export**: the full report as JSON for scripting

mod explanation;
mod export;

pub use explanation::{Severity, VerdictExplanation};
pub use export::{export_json, to_json};

use crate::core::classifier::Verdict;
use crate::core::similarity::SimilarityScore;
use crate::core::source::ImageLocation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Everything known about one finished comparison.
///
/// Built once per call and handed to the caller; never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Correlates this report with the events of the same run
    pub id: Uuid,
    pub location_a: ImageLocation,
    pub location_b: ImageLocation,
    /// Size of each input before normalization
    pub source_dimensions_a: (u32, u32),
    pub source_dimensions_b: (u32, u32),
    /// Size both inputs were compared at
    pub normalized_dimensions: (u32, u32),
    pub verdict: Verdict,
    pub threshold: f64,
    pub duration_ms: u64,
    pub compared_at: DateTime<Utc>,
}

impl ComparisonReport {
    pub fn score(&self) -> SimilarityScore {
        self.verdict.score()
    }

    pub fn is_match(&self) -> bool {
        self.verdict.is_match()
    }

    /// Dialog-ready explanation of the verdict
    pub fn explain(&self) -> VerdictExplanation {
        VerdictExplanation::new(&self.verdict, self.threshold)
    }
}
