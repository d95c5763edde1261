//! # Pipeline Module
//!
//! Runs one signature comparison end to end.
//!
//! ## Pipeline Stages
//! 1. **Load** - Decode and normalize both images (fail fast on either)
//! 2. **Score** - Mean SSIM, as a rounded percentage
//! 3. **Classify** - Strictly above the threshold is a match
//!
//! There is no retry and nothing carries over between comparisons.
//!
//! ## Parallelism
//! The two loads are independent and run on rayon's pool by default.

mod config;
mod executor;

pub use config::MatcherConfig;
pub use executor::{SignatureMatcher, SignatureMatcherBuilder};
