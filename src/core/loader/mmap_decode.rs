//! Reading encoded image bytes.
//!
//! The bytes of an input are read once and shared by the format sniffer,
//! the EXIF orientation reader and the decoder. Phone photos of a signature
//! are typically several megabytes, so those are memory-mapped instead of
//! copied; small scans are read into a buffer.

use crate::error::ImageDecodeError;
use memmap2::Mmap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Files at least this large are memory-mapped (1MB)
const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// Encoded bytes of one input file
pub enum FileBytes {
    Owned(Vec<u8>),
    Mapped(Mmap),
}

/// Read the whole file at `path`, opening it exactly once.
pub fn read_file_bytes(path: &Path) -> Result<FileBytes, ImageDecodeError> {
    let io_error = |source: std::io::Error| ImageDecodeError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(io_error)?;
    let len = file.metadata().map_err(io_error)?.len();

    if len >= MMAP_THRESHOLD {
        // SAFETY: the map is read-only and dropped before the comparison returns.
        let map = unsafe { Mmap::map(&file) }.map_err(io_error)?;
        return Ok(FileBytes::Mapped(map));
    }

    let mut buffer = Vec::with_capacity(len as usize);
    file.read_to_end(&mut buffer).map_err(io_error)?;
    Ok(FileBytes::Owned(buffer))
}

impl AsRef<[u8]> for FileBytes {
    fn as_ref(&self) -> &[u8] {
        match self {
            FileBytes::Owned(bytes) => bytes,
            FileBytes::Mapped(map) => map,
        }
    }
}

impl std::ops::Deref for FileBytes {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.as_ref()
    }
}

/// Container format sniffed from leading magic bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SniffedFormat {
    Jpeg,
    Png,
    Other,
}

/// Sniff the container format from the first bytes of a file.
///
/// The extension is ignored; a PNG saved as `.jpg` still decodes as PNG.
pub fn sniff_format(bytes: &[u8]) -> SniffedFormat {
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        SniffedFormat::Jpeg
    } else if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        SniffedFormat::Png
    } else {
        SniffedFormat::Other
    }
}
