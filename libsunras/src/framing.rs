use std::io::{self, Read, Seek, SeekFrom};
use strum::Display;
use tracing::{debug, info};

/// First 8 bytes of a `TIFILES` container header: `BEL` followed by `TIFILES`
pub const TIFILES_SIGNATURE: [u8; 8] = *b"\x07TIFILES";
/// Total length of a `TIFILES` container header
pub const TIFILES_HEADER_LEN: u64 = 128;
// the signature plus one byte, as written by the TI tools
const PEEK_LEN: usize = 9;

#[derive(Debug, Eq, PartialEq, Copy, Clone, Display)]
/// How a plane stream is stored
pub enum Framing {
    /// The plane is preceded by a 128-byte `TIFILES` header
    #[strum(to_string = "TIFILES")]
    TiFiles,
    /// The plane starts at the first byte of the stream
    #[strum(to_string = "raw")]
    Raw,
}

impl Framing {
    /// Returns the number of bytes preceding the plane data
    #[must_use]
    pub const fn data_offset(self) -> u64 {
        match self {
            Self::TiFiles => TIFILES_HEADER_LEN,
            Self::Raw => 0,
        }
    }
}

/// Peeks at the start of `stream` and positions it at the first plane byte
///
/// If the stream begins with [`TIFILES_SIGNATURE`], the whole 128-byte header is skipped.
/// Otherwise the stream is put back where it was on entry. Streams shorter than the
/// signature are treated as [`Framing::Raw`].
///
/// # Errors
///
/// This function errors if the stream cannot be read or seeked
pub fn detect_framing<R: Read + Seek + ?Sized>(stream: &mut R) -> io::Result<Framing> {
    let start = stream.stream_position()?;
    let mut peek = [0; PEEK_LEN];
    let read = read_up_to(stream, &mut peek)?;
    debug!("peeked {read} bytes at offset {start}");

    if read >= TIFILES_SIGNATURE.len() && peek[..TIFILES_SIGNATURE.len()] == TIFILES_SIGNATURE {
        stream.seek(SeekFrom::Start(start + TIFILES_HEADER_LEN))?;
        info!("TIFILES format: skipping header");
        Ok(Framing::TiFiles)
    } else {
        stream.seek(SeekFrom::Start(start))?;
        info!("raw data: no header");
        Ok(Framing::Raw)
    }
}

// like `read_exact`, but a short stream is not an error
fn read_up_to<R: Read + ?Sized>(stream: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match stream.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
