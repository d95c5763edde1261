//! # Core Module
//!
//! The UI-agnostic signature comparison engine.
//!
//! ## Modules
//! - `source` - Image locations, picker filter and capture device discovery
//! - `loader` - Decodes images and normalizes them to the canonical grayscale size
//! - `similarity` - Mean SSIM and the rounded similarity percentage
//! - `classifier` - Turns a score into a match / no-match verdict
//! - `pipeline` - Runs load, score and classify for one pair
//! - `reporter` - Explains and exports the result

pub mod classifier;
pub mod loader;
pub mod pipeline;
pub mod reporter;
pub mod similarity;
pub mod source;

// Re-export commonly used types
pub use classifier::Verdict;
pub use loader::{ImageLoader, NormalizedImage};
pub use pipeline::{MatcherConfig, SignatureMatcher};
pub use reporter::{ComparisonReport, VerdictExplanation};
pub use similarity::{SimilarityScore, SsimParams};
pub use source::ImageLocation;
