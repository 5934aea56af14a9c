#![allow(clippy::module_name_repetitions)]

pub(crate) mod compress;
pub(crate) mod copy;
pub(crate) mod header;
pub(crate) mod report;

/// Module containing the low-level plane writers and header constants
///
/// These write plane bytes only; the header and the length patching are left to the caller
pub mod raw {
    pub use crate::raster::compress::{encode_rle, RleEncoder, Run, Token, MARKER};
    pub use crate::raster::copy::copy_raw;
    pub use crate::raster::header::{HEADER_LEN, RMT_RAW, SUN_RASTER_MAGIC};
}

use crate::{error::Error, framing::detect_framing};
use anyhow::{Context, Result};
use compress::encode_rle;
use copy::copy_raw;
use header::RasterHeader;
use report::{ConversionReport, PlaneReport};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Seek, Write},
    path::Path,
};
use strum::Display;
use tracing::{debug, info, instrument, warn};

#[derive(Default, Debug, Eq, PartialEq, Copy, Clone, Display)]
/// How plane data is stored in the raster file
pub enum Encoding {
    /// Planes are copied as-is (`RT_STANDARD`)
    #[default]
    #[strum(to_string = "raw")]
    Raw,
    /// Planes are run-length encoded (`RT_BYTE_ENCODED`)
    #[strum(to_string = "rle")]
    Rle,
}

impl Encoding {
    /// Returns [`Encoding::Rle`] if `compressed` is set, else [`Encoding::Raw`]
    #[must_use]
    pub const fn from_compressed(compressed: bool) -> Self {
        if compressed {
            Self::Rle
        } else {
            Self::Raw
        }
    }

    /// Returns `true` for [`Encoding::Rle`]
    #[must_use]
    pub const fn is_compressed(self) -> bool {
        matches!(self, Self::Rle)
    }
}

impl From<Encoding> for u32 {
    fn from(value: Encoding) -> Self {
        match value {
            Encoding::Raw => 1,
            Encoding::Rle => 2,
        }
    }
}

impl TryFrom<u32> for Encoding {
    type Error = &'static str;

    fn try_from(value: u32) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Raw),
            2 => Ok(Self::Rle),
            _ => Err("Only raster types 1 and 2 are supported"),
        }
    }
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, Display)]
/// The two planes of a TI-99/4A bitmap mode image
pub enum Plane {
    /// Colour table (`.TIAC`), stored as the raster colour map
    #[strum(to_string = "color map")]
    ColorMap,
    /// Pattern table (`.TIAP`), stored as the raster image data
    #[strum(to_string = "bitmap")]
    Bitmap,
}

impl Plane {
    /// Returns the file extension TI tools use for this plane
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::ColorMap => "TIAC",
            Self::Bitmap => "TIAP",
        }
    }
}

/// Writes a complete Sun Raster file from a colour map plane and a bitmap plane
///
/// The header is written first with zeroed lengths, followed by the colour map plane and the
/// bitmap plane, after which the header lengths are patched in place. Either input may carry
/// a `TIFILES` header, which is skipped.
///
/// Size anomalies do not fail the conversion; see [`ConversionReport::advisories`].
///
/// # Errors
///
/// This function errors if any stream fails to read, write or seek, or if a plane is longer
/// than a 32-bit header field can hold
#[instrument(skip(colormap, bitmap, output))]
pub fn convert<C, B, O>(
    mut colormap: C,
    mut bitmap: B,
    mut output: O,
    encoding: Encoding,
) -> Result<ConversionReport, Error>
where
    C: Read + Seek,
    B: Read + Seek,
    O: Write + Seek,
{
    let header = RasterHeader::new(encoding);
    output.write_all(&header.to_bytes())?;
    debug!("Wrote {encoding} raster header");

    let colormap = write_plane(Plane::ColorMap, &mut colormap, &mut output, encoding)?;
    let bitmap = write_plane(Plane::Bitmap, &mut bitmap, &mut output, encoding)?;
    output.flush()?;

    header
        .finalize(bitmap.length, colormap.length)
        .patch(&mut output)?;
    output.flush()?;
    info!("Finished writing raster");

    let report = ConversionReport {
        encoding,
        colormap,
        bitmap,
    };
    for advisory in report.advisories() {
        warn!("{advisory}");
    }
    Ok(report)
}

fn write_plane<R, W>(
    plane: Plane,
    input: &mut R,
    output: &mut W,
    encoding: Encoding,
) -> Result<PlaneReport, Error>
where
    R: Read + Seek,
    W: Write,
{
    let framing = detect_framing(&mut *input)?;
    let input = BufReader::new(input);
    let written = match encoding {
        Encoding::Raw => copy_raw(input, &mut *output),
        Encoding::Rle => encode_rle(input, &mut *output),
    }
    .map_err(|e| e.into_plane_error(plane))?;

    let length =
        u32::try_from(written).map_err(|_| Error::LengthOverflow { plane, length: written })?;
    info!("{plane} data: {encoding} wrote {length} bytes");
    Ok(PlaneReport {
        plane,
        framing,
        length,
    })
}

/// Converts a colour map file and a bitmap file into a Sun Raster file at `output_path`
///
/// The output file is created, or truncated if it exists.
///
/// # Errors
///
/// This function will error if an input cannot be opened, the output cannot be created, or
/// the conversion fails. See [`convert`] for conversion errors
pub fn convert_files(
    colormap_path: impl AsRef<Path>,
    bitmap_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    encoding: Encoding,
) -> Result<ConversionReport> {
    let (colormap_path, bitmap_path, output_path) = (
        colormap_path.as_ref(),
        bitmap_path.as_ref(),
        output_path.as_ref(),
    );
    let colormap = File::open(colormap_path)
        .with_context(|| format!("Cannot open {}", colormap_path.display()))?;
    let bitmap = File::open(bitmap_path)
        .with_context(|| format!("Cannot open {}", bitmap_path.display()))?;
    let output = File::options()
        .create(true)
        .write(true)
        .truncate(true)
        .open(output_path)
        .with_context(|| format!("Cannot open {}", output_path.display()))?;

    let report = convert(colormap, bitmap, BufWriter::new(output), encoding)
        .with_context(|| format!("Write raster to {}", output_path.display()))?;
    info!("Created Sun Raster image file: {}", output_path.display());
    Ok(report)
}
