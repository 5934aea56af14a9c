#![allow(dead_code)]

use libsunras::framing::TIFILES_SIGNATURE;
use libsunras::raster::raw::MARKER;

pub const IMAGE_NAME: &str = "PICTURE";

/// Expands a Sun byte-encoded stream, treating `MARKER 0x00` as one literal marker byte
pub fn decode_rle(encoded: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut bytes = encoded.iter().copied();
    while let Some(byte) = bytes.next() {
        if byte != MARKER {
            out.push(byte);
            continue;
        }
        let count = bytes.next().expect("run truncated after marker");
        if count == 0 {
            out.push(MARKER);
            continue;
        }
        let value = bytes.next().expect("run truncated after count");
        out.extend(std::iter::repeat(value).take(usize::from(count) + 1));
    }
    out
}

/// Wraps `plane` in a 128-byte TIFILES header
pub fn with_tifiles_header(plane: &[u8]) -> Vec<u8> {
    let mut data = TIFILES_SIGNATURE.to_vec();
    // the 9th byte is not part of the signature
    data.push(0x00);
    data.extend(std::iter::repeat(0x5A).take(119));
    assert_eq!(data.len(), 128);
    data.extend_from_slice(plane);
    data
}

/// A deterministic mix of runs, pairs, markers and literals
pub fn mixed_plane(len: usize) -> Vec<u8> {
    let mut state = 0x2545_f491_u32;
    let mut data = Vec::with_capacity(len);
    while data.len() < len {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let [value, repeat, ..] = state.to_le_bytes();
        let value = if value & 0x0F == 0 { MARKER } else { value };
        let repeat = usize::from(repeat % 8) + usize::from(repeat >> 7) * 300;
        data.extend(std::iter::repeat(value).take(repeat.max(1)));
    }
    data.truncate(len);
    data
}
