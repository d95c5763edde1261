//! File-type filtering for picked signature images.

use std::collections::BTreeSet;
use std::path::Path;

/// Decides whether a picked file is an image type we offer for comparison
pub struct SourceFilter {
    /// Lowercase extensions to accept
    extensions: BTreeSet<String>,
}

impl SourceFilter {
    /// Create a filter with the default picker extensions
    pub fn new() -> Self {
        Self {
            extensions: ["jpeg", "png", "jpg"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }

    /// Override the list of extensions to accept
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions.into_iter().map(|e| e.to_lowercase()).collect();
        self
    }

    /// Check if a file should be offered
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.contains(&ext.to_lowercase()))
            .unwrap_or(false)
    }

    /// Comma-separated list of accepted extensions, for messages
    pub fn describe(&self) -> String {
        self.extensions
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for SourceFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_accepts_png_and_jpeg() {
        let filter = SourceFilter::new();
        assert!(filter.accepts(Path::new("/sigs/one.png")));
        assert!(filter.accepts(Path::new("/sigs/one.JPEG")));
        assert!(filter.accepts(Path::new("/sigs/one.jpg")));
    }

    #[test]
    fn filter_rejects_other_files() {
        let filter = SourceFilter::new();
        assert!(!filter.accepts(Path::new("/sigs/one.bmp")));
        assert!(!filter.accepts(Path::new("/sigs/notes.txt")));
    }

    #[test]
    fn filter_handles_no_extension() {
        let filter = SourceFilter::new();
        assert!(!filter.accepts(Path::new("/sigs/no_extension")));
    }

    #[test]
    fn custom_extensions_are_lowercased() {
        let filter = SourceFilter::new().with_extensions(vec!["TIFF".to_string()]);
        assert!(filter.accepts(Path::new("scan.tiff")));
        assert!(!filter.accepts(Path::new("scan.png")));
        assert_eq!(filter.describe(), "tiff");
    }
}
