use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use anyhow::{ensure, Result};
use libsunras::{convert_files, ConversionReport, Encoding, Plane, PlaneReport};
use tracing::{info, instrument};

/// Extension of the Sun Raster output file
pub const RASTER_EXTENSION: &str = "ras";

/// The three files involved in converting one image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePaths {
    pub colormap: PathBuf,
    pub bitmap: PathBuf,
    pub output: PathBuf,
}

impl ImagePaths {
    /// `NAME` -> `NAME.TIAC`, `NAME.TIAP`, `NAME.ras`
    pub fn from_image_name(name: &Path) -> Result<Self> {
        ensure!(
            !name.as_os_str().is_empty(),
            "Image name must not be empty"
        );
        Ok(Self {
            colormap: append_extension(name, Plane::ColorMap.extension()),
            bitmap: append_extension(name, Plane::Bitmap.extension()),
            output: append_extension(name, RASTER_EXTENSION),
        })
    }

    #[must_use]
    pub fn with_output(self, output: Option<PathBuf>) -> Self {
        match output {
            Some(output) => Self { output, ..self },
            None => self,
        }
    }
}

// appends rather than replaces, so `pic.v2` becomes `pic.v2.TIAC`
fn append_extension(name: &Path, extension: &str) -> PathBuf {
    let mut path = OsString::from(name.as_os_str());
    path.push(".");
    path.push(extension);
    PathBuf::from(path)
}

#[instrument]
pub fn ti_to_sun(paths: &ImagePaths, encoding: Encoding) -> Result<ConversionReport> {
    info!("Opening colortable file: {}", paths.colormap.display());
    info!("Opening bitmap pattern file: {}", paths.bitmap.display());
    let report = convert_files(&paths.colormap, &paths.bitmap, &paths.output, encoding)?;
    info!("Created Sun Raster image file: {}", paths.output.display());
    Ok(report)
}

/// One line per plane, e.g. `Bitmap data: Compressed to 216 bytes`
#[must_use]
pub fn summary(report: &ConversionReport) -> Vec<String> {
    [report.colormap, report.bitmap]
        .iter()
        .map(|plane| describe_plane(plane, report.encoding))
        .collect()
}

fn describe_plane(plane: &PlaneReport, encoding: Encoding) -> String {
    let name = match plane.plane {
        Plane::ColorMap => "Color map",
        Plane::Bitmap => "Bitmap",
    };
    let action = if encoding.is_compressed() {
        "Compressed to"
    } else {
        "Converted"
    };
    format!(
        "{name} data ({} input): {action} {} bytes",
        plane.framing, plane.length
    )
}
