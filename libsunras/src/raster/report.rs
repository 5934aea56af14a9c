use std::fmt::Display;

use crate::{
    framing::Framing,
    raster::{Encoding, Plane},
    IMAGE_SIZE, PLANE_SIZE,
};

/// What was written for one plane
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub struct PlaneReport {
    /// Which plane this is
    pub plane: Plane,
    /// Whether the input carried a `TIFILES` header
    pub framing: Framing,
    /// Number of bytes written to the raster file (after encoding)
    pub length: u32,
}

impl PlaneReport {
    /// Returns an [`Advisory`] if the plane length is suspicious for the given encoding
    ///
    /// - a run-length encoded plane longer than an uncompressed one gained nothing
    /// - an uncompressed plane that isn't exactly 6144 bytes probably carried an unknown header
    #[must_use]
    pub fn advisory(&self, encoding: Encoding) -> Option<Advisory> {
        let length = self.length as usize;
        match encoding {
            Encoding::Rle if length > PLANE_SIZE => Some(Advisory::PlaneExpanded {
                plane: self.plane,
                length: self.length,
            }),
            Encoding::Raw if length != PLANE_SIZE => Some(Advisory::UnexpectedPlaneSize {
                plane: self.plane,
                length: self.length,
            }),
            _ => None,
        }
    }
}

/// Result of a conversion
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub struct ConversionReport {
    /// How the planes were stored
    pub encoding: Encoding,
    /// Colour map plane, written first
    pub colormap: PlaneReport,
    /// Bitmap plane, written second
    pub bitmap: PlaneReport,
}

impl ConversionReport {
    /// Returns the combined length of both planes, excluding the raster header
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.colormap.length as u64 + self.bitmap.length as u64
    }

    /// Returns `true` if run-length encoding made the image larger than an uncompressed one
    #[must_use]
    pub const fn is_expanded(&self) -> bool {
        self.encoding.is_compressed() && self.total() > IMAGE_SIZE as u64
    }

    /// Returns the non-fatal warnings for this conversion, per plane first
    #[must_use]
    pub fn advisories(&self) -> Vec<Advisory> {
        let mut advisories: Vec<_> = [self.colormap, self.bitmap]
            .iter()
            .filter_map(|p| p.advisory(self.encoding))
            .collect();
        if self.is_expanded() {
            advisories.push(Advisory::TotalExpanded {
                total: self.total(),
            });
        }
        advisories
    }
}

/// Non-fatal conditions worth telling the user about
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum Advisory {
    /// A run-length encoded plane is larger than 6144 bytes
    PlaneExpanded {
        /// the plane
        plane: Plane,
        /// its encoded length
        length: u32,
    },
    /// An uncompressed plane is not 6144 bytes long and may be corrupt
    UnexpectedPlaneSize {
        /// the plane
        plane: Plane,
        /// its length
        length: u32,
    },
    /// Both run-length encoded planes together are larger than 12288 bytes
    TotalExpanded {
        /// combined encoded length
        total: u64,
    },
}

impl Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PlaneExpanded { plane, length } => write!(
                f,
                "the compressed {plane} size {length} is larger than uncompressed size of {PLANE_SIZE} bytes, \
                 it may be smaller if uncompressed"
            ),
            Self::UnexpectedPlaneSize { plane, length } => write!(
                f,
                "the converted {plane} size {length} is not the expected size of {PLANE_SIZE} bytes, \
                 the data may be corrupt (save files with a TIFILES header or as raw files)"
            ),
            Self::TotalExpanded { total } => write!(
                f,
                "the RLE encoded image size of {total} bytes is larger than uncompressed image size"
            ),
        }
    }
}
