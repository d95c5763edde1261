//! Matcher configuration.
//!
//! Everything the comparison core reads: the match threshold, the canonical
//! size images are squashed to, and the SSIM window parameters. Fixed once
//! a matcher is built.

use crate::core::classifier::ThresholdStrategy;
use crate::core::loader::DEFAULT_SIZE;
use crate::core::similarity::SsimParams;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for a [`super::SignatureMatcher`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Scores strictly above this percentage are a match
    pub threshold: f64,
    /// Canonical width images are resized to
    pub width: u32,
    /// Canonical height images are resized to
    pub height: u32,
    /// SSIM window parameters
    pub ssim: SsimParams,
    /// Load both inputs on separate threads
    pub parallel_load: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            threshold: ThresholdStrategy::DEFAULT_THRESHOLD,
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            ssim: SsimParams::default(),
            parallel_load: true,
        }
    }
}

impl MatcherConfig {
    /// Check every field, returning the first problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        ThresholdStrategy::new(self.threshold)?;

        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        self.ssim.validate(self.width, self.height)
    }

    /// Load from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Per-user config file location, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("signature-match").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_are_valid() {
        let config = MatcherConfig::default();
        assert_eq!(config.threshold, 85.0);
        assert_eq!((config.width, config.height), (300, 300));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_dimensions() {
        let config = MatcherConfig {
            width: 0,
            ..MatcherConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn rejects_threshold_out_of_range() {
        let config = MatcherConfig {
            threshold: 150.0,
            ..MatcherConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThreshold { .. })
        ));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "threshold": 90.0, "ssim": { "window": 9 } }"#).unwrap();

        let config = MatcherConfig::from_json_file(&path).unwrap();
        assert_eq!(config.threshold, 90.0);
        assert_eq!(config.width, 300);
        assert_eq!(config.ssim.window, 9);
        assert_eq!(config.ssim.k1, 0.01);
    }

    #[test]
    fn invalid_json_names_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ threshold: ").unwrap();

        let err = MatcherConfig::from_json_file(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn invalid_values_in_file_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "width": 4, "height": 4 }"#).unwrap();

        assert!(matches!(
            MatcherConfig::from_json_file(&path),
            Err(ConfigError::InvalidWindow { .. })
        ));
    }
}
