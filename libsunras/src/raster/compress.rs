use std::io::{self, Read, Write};
use tracing::{debug, trace};

use crate::error::Interrupted;

/// Escape byte opening every encoded run
pub const MARKER: u8 = 0x80;

/// A run of identical bytes, at most 256 long
///
/// `count` is the number of repeats minus one, so it always fits a byte
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub struct Run {
    value: u8,
    count: u8,
}

impl Run {
    /// Starts a run with a single occurrence of `value`
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self { value, count: 0 }
    }

    /// Returns the repeated byte
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.value
    }

    /// Returns the number of occurrences (1..=256)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count as usize + 1
    }

    /// Runs always hold at least one byte
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    // returns false if `byte` must start a new run
    fn extend(&mut self, byte: u8) -> bool {
        if byte == self.value && self.count < u8::MAX {
            self.count += 1;
            true
        } else {
            false
        }
    }

    /// Returns the cheapest token for this run
    #[must_use]
    pub const fn token(&self) -> Token {
        match (self.value, self.count) {
            (MARKER, 0) => Token::EscapedMarker,
            (MARKER, count) => Token::Encoded {
                count,
                value: MARKER,
            },
            (value, 0) => Token::Literal(value),
            (value, 1) => Token::Pair(value),
            (value, count) => Token::Encoded { count, value },
        }
    }
}

/// An element of the encoded stream
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum Token {
    /// A single byte, written as-is
    Literal(u8),
    /// Two identical bytes, written as-is since encoding them saves nothing
    Pair(u8),
    /// `MARKER count value`: `count + 1` occurrences of `value`
    Encoded {
        /// occurrences minus one
        count: u8,
        /// the repeated byte
        value: u8,
    },
    /// `MARKER 0x00`: a single occurrence of the marker byte
    EscapedMarker,
}

impl Token {
    /// Returns the encoded bytes, in a fixed buffer with the used length
    #[must_use]
    pub const fn to_bytes(self) -> ([u8; 3], usize) {
        match self {
            Self::Literal(value) => ([value, 0, 0], 1),
            Self::Pair(value) => ([value, value, 0], 2),
            Self::Encoded { count, value } => ([MARKER, count, value], 3),
            Self::EscapedMarker => ([MARKER, 0, 0], 2),
        }
    }

    fn write_to<W: Write + ?Sized>(self, writer: &mut W) -> io::Result<usize> {
        let (buf, len) = self.to_bytes();
        writer.write_all(&buf[..len])?;
        Ok(len)
    }
}

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
enum State {
    /// Nothing read yet
    Idle,
    /// Accumulating a run
    Scanning(Run),
    /// Input is exhausted, the last run still has to be written
    FlushPending(Run),
    Done,
}

/// Push-style Sun byte-encoded run-length encoder
///
/// Feed bytes with [`Self::update`], then call [`Self::finish`] to write the final run.
pub struct RleEncoder<W> {
    state: State,
    writer: W,
    written: u64,
}

impl<W: Write> RleEncoder<W> {
    /// Creates an encoder writing to `writer`
    pub const fn new(writer: W) -> Self {
        Self {
            state: State::Idle,
            writer,
            written: 0,
        }
    }

    /// Returns the number of encoded bytes written so far
    pub const fn written(&self) -> u64 {
        self.written
    }

    /// Returns the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Adds one input byte, writing the previous run if `byte` does not continue it
    ///
    /// # Errors
    ///
    /// This function errors if writing fails, or if the encoder was already finished
    pub fn update(&mut self, byte: u8) -> io::Result<()> {
        match self.state {
            State::Idle => self.transit(State::Scanning(Run::new(byte))),
            State::Scanning(mut run) => {
                if run.extend(byte) {
                    self.state = State::Scanning(run);
                } else {
                    self.emit(run)?;
                    self.transit(State::Scanning(Run::new(byte)));
                }
            }
            State::FlushPending(_) | State::Done => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "update after the end of input",
                ));
            }
        }
        Ok(())
    }

    /// Marks the end of input and writes the pending run, returning the total bytes written
    ///
    /// If writing the last run fails, calling this again retries it.
    ///
    /// # Errors
    ///
    /// This function errors if writing or flushing fails
    pub fn finish(&mut self) -> io::Result<u64> {
        loop {
            match self.state {
                State::Idle => self.transit(State::Done),
                State::Scanning(run) => self.transit(State::FlushPending(run)),
                State::FlushPending(run) => {
                    self.emit(run)?;
                    self.transit(State::Done);
                }
                State::Done => break,
            }
        }
        self.writer.flush()?;
        Ok(self.written)
    }

    fn transit(&mut self, state: State) {
        trace!("transit {:?} -> {:?}", self.state, state);
        self.state = state;
    }

    fn emit(&mut self, run: Run) -> io::Result<()> {
        let token = run.token();
        trace!("emit {token:?}");
        let len = token.write_to(&mut self.writer)?;
        self.written += len as u64;
        Ok(())
    }
}

/// Run-length encodes `reader` to exhaustion into `writer`, returning the encoded length
///
/// # Errors
///
/// This function errors if reading or writing fails; the error holds the number of encoded
/// bytes written up to that point
pub fn encode_rle(reader: impl Read, writer: impl Write) -> Result<u64, Interrupted> {
    let mut encoder = RleEncoder::new(writer);
    let mut read = 0u64;
    for byte in reader.bytes() {
        let written = encoder.written();
        let byte = byte.map_err(|source| Interrupted { written, source })?;
        encoder
            .update(byte)
            .map_err(|source| Interrupted { written, source })?;
        read += 1;
    }
    let written = encoder.written();
    let total = encoder
        .finish()
        .map_err(|source| Interrupted { written, source })?;
    debug!("encoded {read} bytes into {total}");
    Ok(total)
}
