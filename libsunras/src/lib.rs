//! # libsunras
//!
//!
//! This library converts TI-99/4A bitmap images into the Sun Raster image format.
//!
//! A TI-99/4A bitmap mode image (as saved by tools such as Convert9918) consists of two planes of
//! 6144 bytes each (256x192 bits): a pattern plane (`.TIAP`) and a colour table plane (`.TIAC`).
//! Both planes may be stored raw or wrapped in a 128-byte `TIFILES` header. This crate writes
//! them into a single 1-bit deep, 256x192 Sun Raster file, with the colour table stored as a raw
//! colour map and the pattern plane as the image data.
//!
//! ### Compression
//!
//! The output can either hold the planes as-is ([`Encoding::Raw`], `RT_STANDARD`) or compressed
//! with the Sun byte-encoded run-length scheme ([`Encoding::Rle`], `RT_BYTE_ENCODED`):
//!
//! ```"not rust"
//! value != 0x80, 1 repeat      => value
//! value != 0x80, 2 repeats     => value value
//! value != 0x80, n repeats     => 0x80 (n - 1) value       (3 <= n <= 256)
//! value == 0x80, 1 repeat      => 0x80 0x00
//! value == 0x80, n repeats     => 0x80 (n - 1) 0x80        (2 <= n <= 256)
//! ```
//!
//! Longer runs are split into consecutive tokens. Note that high-entropy input can grow under
//! this scheme; the returned [`ConversionReport`] lists an [`Advisory`] when it does.
//!
//! ### Limitations
//!
//! Only the fixed 256x192x1 configuration is supported, and only in one direction: there is no
//! Sun Raster decoder in this crate.
//!
//! ### Usage
//!
//! #### Converting in-memory planes
//!
//! ```rust
//! use std::io::Cursor;
//! use libsunras::{convert, Encoding, PLANE_SIZE};
//!
//! fn main() -> anyhow::Result<()> {
//!     let colormap = Cursor::new(vec![0xf1; PLANE_SIZE]);
//!     let bitmap = Cursor::new(vec![0x00; PLANE_SIZE]);
//!     let mut output = Cursor::new(Vec::new());
//!
//!     let report = convert(colormap, bitmap, &mut output, Encoding::Rle)?;
//!
//!     // 6144 = 24 * 256, and each run of 256 bytes is stored as a 3-byte token
//!     assert_eq!(report.colormap.length, 72);
//!     assert_eq!(report.bitmap.length, 72);
//!     assert!(report.advisories().is_empty());
//!     assert_eq!(output.into_inner().len(), 32 + 72 + 72);
//!     Ok(())
//! }
//! ```
//!
//! #### Converting files
//!
//! ```rust,no_run
//! use libsunras::{convert_files, Encoding};
//!
//! fn main() -> anyhow::Result<()> {
//!     let report = convert_files("PICTURE.TIAC", "PICTURE.TIAP", "PICTURE.ras", Encoding::Raw)?;
//!     for advisory in report.advisories() {
//!         eprintln!("{advisory}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! #### Unstable API
//!
//! This crate is still very much a work-in-progress. Expect breaking changes between minor
//! releases until`v1.0`.
//!
//!

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    missing_docs
)]

mod error;
/// Detection of the `TIFILES` container header
pub mod framing;
/// Module containing the Sun Raster writer
pub mod raster;

pub use error::{Error, Interrupted};
pub use framing::{detect_framing, Framing};
pub use raster::header::{build_header, patch_lengths, FinalizedHeader, RasterHeader};
pub use raster::report::{Advisory, ConversionReport, PlaneReport};
pub use raster::{convert, convert_files, Encoding, Plane};

/// Width of a TI-99/4A bitmap mode image in pixels
pub const IMAGE_WIDTH: u32 = 256;
/// Height of a TI-99/4A bitmap mode image in pixels
pub const IMAGE_HEIGHT: u32 = 192;
/// Size in bytes of one uncompressed plane (256x192 bits)
pub const PLANE_SIZE: usize = 6144;
/// Size in bytes of both uncompressed planes together
pub const IMAGE_SIZE: usize = 2 * PLANE_SIZE;
