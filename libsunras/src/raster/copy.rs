use std::io::{self, Read, Write};
use tracing::{debug, trace};

use crate::error::Interrupted;

const CHUNK_LEN: usize = 256;

/// Copies `reader` to exhaustion into `writer` unchanged, returning the number of bytes copied
///
/// # Errors
///
/// This function errors if reading or writing fails; the error holds the number of bytes
/// copied up to that point
pub fn copy_raw(mut reader: impl Read, mut writer: impl Write) -> Result<u64, Interrupted> {
    let mut buf = [0; CHUNK_LEN];
    let mut written = 0u64;
    loop {
        let read = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => return Err(Interrupted { written, source }),
        };
        writer
            .write_all(&buf[..read])
            .map_err(|source| Interrupted { written, source })?;
        written += read as u64;
        trace!("copied chunk of {read} bytes");
    }
    writer
        .flush()
        .map_err(|source| Interrupted { written, source })?;
    debug!("copied {written} bytes");
    Ok(written)
}
