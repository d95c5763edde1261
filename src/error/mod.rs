//! # Error Module
//!
//! User-friendly error types for signature comparison.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - which image failed, and why
//! - **Keep failures out of the verdict path** - a broken image is never a "no match"

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum SignatureMatchError {
    #[error("Could not load image: {0}")]
    Decode(#[from] ImageDecodeError),

    #[error("Comparison error: {0}")]
    Compare(#[from] CompareError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Image source error: {0}")]
    Source(#[from] SourceError),

    #[error("Report generation error: {0}")]
    Report(#[from] ReportError),
}

impl SignatureMatchError {
    /// The location that failed to load, if this is a load failure
    pub fn failed_location(&self) -> Option<&PathBuf> {
        match self {
            SignatureMatchError::Decode(e) => Some(e.path()),
            _ => None,
        }
    }
}

/// Errors that occur while reading and decoding an input image
#[derive(Error, Debug)]
pub enum ImageDecodeError {
    #[error("Failed to open image file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("Image is empty or corrupted: {path}")]
    Empty { path: PathBuf },
}

impl ImageDecodeError {
    /// The location this error is about
    pub fn path(&self) -> &PathBuf {
        match self {
            ImageDecodeError::Io { path, .. }
            | ImageDecodeError::Decode { path, .. }
            | ImageDecodeError::Empty { path } => path,
        }
    }
}

/// Errors raised by the similarity scorer
#[derive(Error, Debug, PartialEq)]
pub enum CompareError {
    #[error("Images differ in size: {left_width}x{left_height} vs {right_width}x{right_height}")]
    DimensionMismatch {
        left_width: u32,
        left_height: u32,
        right_width: u32,
        right_height: u32,
    },

    #[error("Image {width}x{height} is smaller than the {window}x{window} similarity window")]
    ImageTooSmall { width: u32, height: u32, window: u32 },

    #[error("Normalization failed: {0}")]
    Normalization(String),
}

/// Errors in matcher configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid threshold: {value} (must be 0-100)")]
    InvalidThreshold { value: f64 },

    #[error("Invalid canonical size: {width}x{height} (both sides must be non-zero)")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid similarity window: {window} (must be odd, at least 3 and fit inside {width}x{height})")]
    InvalidWindow { window: u32, width: u32, height: u32 },

    #[error("Invalid stability constant {name} = {value} (must be positive)")]
    InvalidConstant { name: &'static str, value: f64 },

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
}

/// Errors from the capture/selection collaborators that supply image locations
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Unsupported file type for {path} (expected one of: {expected})")]
    UnsupportedExtension { path: PathBuf, expected: String },

    #[error("Capture device {index} is unavailable")]
    ResourceUnavailable { index: u32 },
}

/// Errors that occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to serialize report: {0}")]
    Serialization(String),

    #[error("Failed to write report: {0}")]
    Write(#[from] std::io::Error),
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, SignatureMatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_includes_path() {
        let error = ImageDecodeError::Decode {
            path: PathBuf::from("/signatures/broken.png"),
            reason: "invalid PNG signature".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("/signatures/broken.png"));
        assert!(message.contains("invalid PNG signature"));
    }

    #[test]
    fn io_error_includes_path() {
        let error = ImageDecodeError::Io {
            path: PathBuf::from("nonexistent.png"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(error.to_string().contains("nonexistent.png"));
    }

    #[test]
    fn top_level_error_exposes_failed_location() {
        let error: SignatureMatchError = ImageDecodeError::Empty {
            path: PathBuf::from("/tmp/empty.png"),
        }
        .into();

        assert_eq!(
            error.failed_location(),
            Some(&PathBuf::from("/tmp/empty.png"))
        );
        assert!(error.to_string().contains("/tmp/empty.png"));
    }

    #[test]
    fn config_error_is_not_a_location_failure() {
        let error: SignatureMatchError = ConfigError::InvalidThreshold { value: 120.0 }.into();
        assert!(error.failed_location().is_none());
        assert!(error.to_string().contains("120"));
    }
}
