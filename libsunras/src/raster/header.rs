use bon::Builder;
use std::io::{self, Seek, SeekFrom, Write};
use tracing::{debug, trace};

use crate::{raster::Encoding, IMAGE_HEIGHT, IMAGE_WIDTH};

/// Magic number opening every Sun Raster file
pub const SUN_RASTER_MAGIC: u32 = 0x59a6_6a95;
/// Length of the Sun Raster header in bytes
pub const HEADER_LEN: usize = 32;
/// Colour map type for a raw (non-RGB) colour map
pub const RMT_RAW: u32 = 2;
// offsets of the two fields only known once the planes are written
const IMAGE_LENGTH_OFFSET: u64 = 16;
const COLOR_MAP_LENGTH_OFFSET: u64 = 28;

/// A Sun Raster header whose length fields are not known yet
///
/// The header is laid out as eight big-endian 32-bit fields:
/// ```"not rust"
/// magic, width, height, depth, image length, raster type, colour map type, colour map length
/// ```
///
/// [`Self::to_bytes`] writes both length fields as zero, so the result is only a placeholder.
/// Call [`Self::finalize`] once both planes are written to get a [`FinalizedHeader`].
#[derive(Builder, Debug, Eq, PartialEq, Copy, Clone)]
#[non_exhaustive]
pub struct RasterHeader {
    /// Image width in pixels
    #[builder(default = IMAGE_WIDTH)]
    pub width: u32,
    /// Image height in pixels
    #[builder(default = IMAGE_HEIGHT)]
    pub height: u32,
    /// Bits per pixel
    #[builder(default = 1)]
    pub depth: u32,
    /// Raster type
    pub encoding: Encoding,
}

impl RasterHeader {
    /// Creates a 256x192x1 header
    #[must_use]
    pub fn new(encoding: Encoding) -> Self {
        Self::builder().encoding(encoding).build()
    }

    /// Returns the placeholder header bytes, with both lengths zeroed
    #[must_use]
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        self.encode(0, 0)
    }

    /// Fixes the two length fields
    #[must_use]
    pub const fn finalize(self, bitmap_length: u32, colormap_length: u32) -> FinalizedHeader {
        FinalizedHeader {
            header: self,
            bitmap_length,
            colormap_length,
        }
    }

    fn encode(&self, bitmap_length: u32, colormap_length: u32) -> [u8; HEADER_LEN] {
        let fields = [
            SUN_RASTER_MAGIC,
            self.width,
            self.height,
            self.depth,
            bitmap_length,
            self.encoding.into(),
            RMT_RAW,
            colormap_length,
        ];
        let mut bytes = [0; HEADER_LEN];
        for (chunk, field) in bytes.chunks_exact_mut(4).zip(fields) {
            chunk.copy_from_slice(&field.to_be_bytes());
        }
        trace!("header bytes: {bytes:02x?}");
        bytes
    }
}

/// A Sun Raster header with both length fields known
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub struct FinalizedHeader {
    header: RasterHeader,
    bitmap_length: u32,
    colormap_length: u32,
}

impl FinalizedHeader {
    /// Returns the header this was finalized from
    #[must_use]
    pub const fn header(&self) -> &RasterHeader {
        &self.header
    }

    /// Returns the image data (bitmap plane) length
    #[must_use]
    pub const fn bitmap_length(&self) -> u32 {
        self.bitmap_length
    }

    /// Returns the colour map length
    #[must_use]
    pub const fn colormap_length(&self) -> u32 {
        self.colormap_length
    }

    /// Returns the complete header bytes
    #[must_use]
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        self.header.encode(self.bitmap_length, self.colormap_length)
    }

    /// Overwrites the length fields of a placeholder header already written at the start of
    /// `output`. See [`patch_lengths`]
    ///
    /// # Errors
    ///
    /// This function errors if `output` cannot be seeked or written
    pub fn patch<W: Write + Seek + ?Sized>(&self, output: &mut W) -> io::Result<()> {
        patch_lengths(output, self.bitmap_length, self.colormap_length)
    }
}

/// Returns a 256x192x1 placeholder header, raster type 2 if `compressed`, else 1
#[must_use]
pub fn build_header(compressed: bool) -> [u8; HEADER_LEN] {
    RasterHeader::new(Encoding::from_compressed(compressed)).to_bytes()
}

/// Writes `bitmap_length` at offset 16 and `colormap_length` at offset 28 as big-endian `u32`s
///
/// Must be called after both planes are written: the output is left positioned at its end.
///
/// # Errors
///
/// This function errors if `output` cannot be seeked or written
pub fn patch_lengths<W: Write + Seek + ?Sized>(
    output: &mut W,
    bitmap_length: u32,
    colormap_length: u32,
) -> io::Result<()> {
    output.seek(SeekFrom::Start(IMAGE_LENGTH_OFFSET))?;
    output.write_all(&bitmap_length.to_be_bytes())?;
    // skip raster type and colour map type
    output.seek(SeekFrom::Start(COLOR_MAP_LENGTH_OFFSET))?;
    output.write_all(&colormap_length.to_be_bytes())?;
    let end = output.seek(SeekFrom::End(0))?;
    debug!("patched lengths bitmap={bitmap_length} colormap={colormap_length}, output is {end} bytes");
    Ok(())
}
