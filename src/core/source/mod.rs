//! # Source Module
//!
//! Where image locations come from before the comparison pipeline runs.
//!
//! The comparison core only ever sees an [`ImageLocation`]. Browsing for a
//! file, capturing a frame from a camera, or typing a path are all
//! collaborator concerns that end in one of these.

mod devices;
mod filter;

pub use devices::{available_devices, ensure_available, DeviceProbe, VideoNodeProbe};
pub use filter::SourceFilter;

use crate::error::SourceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// An opaque reference to a readable image resource
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageLocation(PathBuf);

impl ImageLocation {
    /// Wrap a path without any checks
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Accept a path chosen through a file picker.
    ///
    /// Only the file types offered by the picker are accepted.
    pub fn from_picker(path: impl Into<PathBuf>) -> Result<Self, SourceError> {
        let path = path.into();
        let filter = SourceFilter::new();
        if filter.accepts(&path) {
            Ok(Self(path))
        } else {
            Err(SourceError::UnsupportedExtension {
                path,
                expected: filter.describe(),
            })
        }
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl From<PathBuf> for ImageLocation {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

impl From<&Path> for ImageLocation {
    fn from(path: &Path) -> Self {
        Self(path.to_path_buf())
    }
}

impl From<&str> for ImageLocation {
    fn from(path: &str) -> Self {
        Self(PathBuf::from(path))
    }
}

impl AsRef<Path> for ImageLocation {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ImageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Which of the two signatures a captured frame is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptureSlot {
    First,
    Second,
}

impl CaptureSlot {
    /// File name a capture collaborator writes this slot's frame to
    pub fn file_name(&self) -> &'static str {
        match self {
            CaptureSlot::First => "test_img1.png",
            CaptureSlot::Second => "test_img2.png",
        }
    }

    /// Location of this slot's frame inside a capture directory.
    ///
    /// Nothing is created here; writing the frame is up to the collaborator.
    pub fn location_in(&self, capture_dir: &Path) -> ImageLocation {
        ImageLocation(capture_dir.join(self.file_name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picker_accepts_offered_types() {
        assert!(ImageLocation::from_picker("/sigs/a.png").is_ok());
        assert!(ImageLocation::from_picker("/sigs/a.JPG").is_ok());
        assert!(ImageLocation::from_picker("/sigs/a.jpeg").is_ok());
    }

    #[test]
    fn picker_rejects_other_types() {
        let err = ImageLocation::from_picker("/sigs/a.gif").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("/sigs/a.gif"));
        assert!(message.contains("png"));
    }

    #[test]
    fn display_shows_path() {
        let location = ImageLocation::from("sig_real.png");
        assert_eq!(location.to_string(), "sig_real.png");
    }

    #[test]
    fn capture_slots_name_distinct_files() {
        let dir = Path::new("/tmp/capture");
        let first = CaptureSlot::First.location_in(dir);
        let second = CaptureSlot::Second.location_in(dir);

        assert_eq!(first.path(), Path::new("/tmp/capture/test_img1.png"));
        assert_eq!(second.path(), Path::new("/tmp/capture/test_img2.png"));
    }

    #[test]
    fn location_serializes_as_plain_path() {
        let location = ImageLocation::from("/sigs/a.png");
        let json = serde_json::to_string(&location).unwrap();
        assert_eq!(json, "\"/sigs/a.png\"");
    }
}
