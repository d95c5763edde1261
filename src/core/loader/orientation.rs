//! EXIF orientation.
//!
//! Phone and webcam captures store pixels in sensor order and record how
//! to display them in the EXIF Orientation tag. Decoded images are turned
//! upright before they are normalized.

use exif::{In, Reader, Tag, Value};
use image::DynamicImage;
use std::io::Cursor;

/// The eight EXIF orientations, named by the transform that makes the
/// stored image upright
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// 1
    Normal,
    /// 2
    FlipHorizontal,
    /// 3
    Rotate180,
    /// 4
    FlipVertical,
    /// 5: mirror along the main diagonal
    Transpose,
    /// 6: rotate 90° clockwise
    Rotate90,
    /// 7: mirror along the anti-diagonal
    Transverse,
    /// 8: rotate 270° clockwise
    Rotate270,
}

impl Orientation {
    /// Map a raw tag value. Values outside 1-8 are not orientations.
    pub fn from_exif(value: u32) -> Option<Self> {
        match value {
            1 => Some(Orientation::Normal),
            2 => Some(Orientation::FlipHorizontal),
            3 => Some(Orientation::Rotate180),
            4 => Some(Orientation::FlipVertical),
            5 => Some(Orientation::Transpose),
            6 => Some(Orientation::Rotate90),
            7 => Some(Orientation::Transverse),
            8 => Some(Orientation::Rotate270),
            _ => None,
        }
    }

    /// Read the orientation from encoded image bytes.
    ///
    /// Anything without a readable tag (no EXIF block, an unsupported
    /// container, a malformed value) is treated as already upright.
    pub fn read(bytes: &[u8]) -> Self {
        let exif = match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
            Ok(exif) => exif,
            Err(_) => return Orientation::Normal,
        };

        let raw = exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| match field.value {
                Value::Short(ref values) => values.first().map(|&v| v as u32),
                Value::Long(ref values) => values.first().copied(),
                _ => None,
            });

        match raw {
            Some(value) => Self::from_exif(value).unwrap_or_else(|| {
                tracing::debug!(value, "ignoring out-of-range EXIF orientation");
                Orientation::Normal
            }),
            None => Orientation::Normal,
        }
    }

    /// Turn a decoded image upright
    pub fn apply(self, image: DynamicImage) -> DynamicImage {
        match self {
            Orientation::Normal => image,
            Orientation::FlipHorizontal => image.fliph(),
            Orientation::Rotate180 => image.rotate180(),
            Orientation::FlipVertical => image.flipv(),
            Orientation::Transpose => image.rotate90().fliph(),
            Orientation::Rotate90 => image.rotate90(),
            Orientation::Transverse => image.rotate270().fliph(),
            Orientation::Rotate270 => image.rotate270(),
        }
    }
}
