use crate::raster::Plane;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
/// Possible `libsunras` errors
pub enum Error {
    /// Error returned if an input or the output cannot be read, written or seeked
    /// outside of plane data (header write, framing detection, length patching)
    #[error("i/o error")]
    Io(#[from] io::Error),
    /// Error returned if the i/o fails while a plane is being written. `written` holds the
    /// number of plane bytes that reached the output before the failure
    #[error("{plane} plane interrupted after {written} bytes")]
    PlaneInterrupted {
        /// the plane being written
        plane: Plane,
        /// bytes written for this plane before the failure
        written: u64,
        /// underlying i/o error
        #[source]
        source: io::Error,
    },
    /// Error returned if a plane is too long for the 32-bit length fields of the header
    #[error("{plane} plane length {length} does not fit in a raster header field")]
    LengthOverflow {
        /// the offending plane
        plane: Plane,
        /// number of bytes written for the plane
        length: u64,
    },
}

/// An i/o failure partway through copying or encoding a stream
#[derive(Error, Debug)]
#[error("stream interrupted after {written} bytes")]
pub struct Interrupted {
    /// bytes successfully written before the failure
    pub written: u64,
    /// underlying i/o error
    #[source]
    pub source: io::Error,
}

impl Interrupted {
    pub(crate) fn into_plane_error(self, plane: Plane) -> Error {
        Error::PlaneInterrupted {
            plane,
            written: self.written,
            source: self.source,
        }
    }
}
