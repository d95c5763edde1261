//! Capture device discovery.
//!
//! Probing is trial-and-error: ask each index in turn whether a device
//! answers. The comparison pipeline never depends on this.

use crate::error::SourceError;
use std::path::PathBuf;

/// Capability query for a capture backend
pub trait DeviceProbe {
    /// Whether a device at this index opens and delivers a frame
    fn is_available(&self, index: u32) -> bool;
}

/// Probes Video4Linux device nodes (`/dev/video<N>`).
///
/// Reports nothing on platforms without them.
#[derive(Debug, Clone)]
pub struct VideoNodeProbe {
    root: PathBuf,
}

impl VideoNodeProbe {
    pub fn new() -> Self {
        Self {
            root: PathBuf::from("/dev"),
        }
    }

    /// Probe nodes under a different directory
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Default for VideoNodeProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceProbe for VideoNodeProbe {
    fn is_available(&self, index: u32) -> bool {
        if !cfg!(target_os = "linux") {
            return false;
        }
        self.root.join(format!("video{}", index)).exists()
    }
}

/// List responding device indices in `0..max_index`.
///
/// Falls back to `[0]` when nothing responds, so a capture UI always has a
/// default to offer.
pub fn available_devices(probe: &dyn DeviceProbe, max_index: u32) -> Vec<u32> {
    let found: Vec<u32> = (0..max_index).filter(|&i| probe.is_available(i)).collect();

    if found.is_empty() {
        tracing::debug!(max_index, "no capture devices responded, defaulting to 0");
        vec![0]
    } else {
        tracing::debug!(?found, "capture devices found");
        found
    }
}

/// Fail with `ResourceUnavailable` unless the device at `index` responds
pub fn ensure_available(probe: &dyn DeviceProbe, index: u32) -> Result<(), SourceError> {
    if probe.is_available(index) {
        Ok(())
    } else {
        Err(SourceError::ResourceUnavailable { index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProbe(Vec<u32>);

    impl DeviceProbe for FixedProbe {
        fn is_available(&self, index: u32) -> bool {
            self.0.contains(&index)
        }
    }

    #[test]
    fn lists_responding_devices_in_order() {
        let probe = FixedProbe(vec![3, 1]);
        assert_eq!(available_devices(&probe, 10), vec![1, 3]);
    }

    #[test]
    fn ignores_devices_past_max_index() {
        let probe = FixedProbe(vec![2, 12]);
        assert_eq!(available_devices(&probe, 10), vec![2]);
    }

    #[test]
    fn falls_back_to_default_device() {
        let probe = FixedProbe(vec![]);
        assert_eq!(available_devices(&probe, 10), vec![0]);
    }

    #[test]
    fn ensure_available_reports_missing_device() {
        let probe = FixedProbe(vec![0]);
        assert!(ensure_available(&probe, 0).is_ok());

        let err = ensure_available(&probe, 4).unwrap_err();
        assert!(err.to_string().contains("4"));
    }

    #[test]
    fn video_node_probe_with_empty_root_finds_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let probe = VideoNodeProbe::with_root(dir.path());
        assert!(!probe.is_available(0));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn video_node_probe_sees_device_nodes() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("video1"), b"").unwrap();

        let probe = VideoNodeProbe::with_root(dir.path());
        assert_eq!(available_devices(&probe, 4), vec![1]);
    }
}
