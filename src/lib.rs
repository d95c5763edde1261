//! # Signature Match
//!
//! Decides whether two signature images match by structural similarity.
//!
//! ## How a comparison works
//! - Both images are decoded, converted to grayscale and squashed to 300x300
//! - Mean SSIM over the two is scaled to a percentage and rounded to 2 decimals
//! - Anything strictly above the threshold (85 by default) is a match
//!
//! A comparison is a pure function of its two inputs and the configuration.
//! Nothing is cached or persisted between calls.
//!
//! ## Architecture
//! - `core` - The comparison engine
//! - `events` - Event-driven progress reporting (GUI-ready)
//! - `error` - User-friendly error types
//!
//! ## Example
//! ```no_run
//! use signature_match::core::ImageLocation;
//!
//! let report = signature_match::compare(
//!     &ImageLocation::from("reference.png"),
//!     &ImageLocation::from("candidate.jpg"),
//! )?;
//! println!("{}", report.explain().message);
//! # Ok::<(), signature_match::SignatureMatchError>(())
//! ```

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{Result, SignatureMatchError};

use crate::core::{ComparisonReport, ImageLocation, SignatureMatcher};
use tracing_subscriber::EnvFilter;

/// Compare two signature images with the default configuration
pub fn compare(a: &ImageLocation, b: &ImageLocation) -> Result<ComparisonReport> {
    SignatureMatcher::builder().build()?.compare(a, b)
}

/// Initialize tracing for the library
///
/// This should be called by the application entry point (CLI or GUI).
pub fn init_tracing() {
    install_subscriber(EnvFilter::from_default_env());
}

/// Initialize tracing, using `default_directive` when `RUST_LOG` is unset
pub fn init_tracing_with_default(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    install_subscriber(filter);
}

fn install_subscriber(filter: EnvFilter) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");
}
