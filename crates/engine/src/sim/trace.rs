//! Address trace reader.
//!
//! A trace is a sequence of whitespace-separated hexadecimal addresses, with
//! or without a `0x` prefix. Reading is lazy and fail-stop: the first token
//! that is not a 32-bit hexadecimal number ends the trace, the same as end of
//! input. I/O errors are reported once and also end the trace.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, warn};

use crate::common::error::TraceError;

/// Parses one trace token.
///
/// Returns `None` for empty tokens, non-hex digits, and values wider than 32 bits.
pub fn parse_address(token: &str) -> Option<u32> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

/// Lazy iterator over the addresses of a trace.
///
/// Lines are read as raw bytes, so a byte that is not valid UTF-8 is just
/// another malformed token.
#[derive(Debug)]
pub struct TraceReader<R> {
    reader: R,
    line: Vec<u8>,
    cursor: usize,
    addresses: u64,
    done: bool,
}

impl TraceReader<BufReader<File>> {
    /// Opens a trace file.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Open`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TraceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "opened trace");
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps any buffered reader.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
            cursor: 0,
            addresses: 0,
            done: false,
        }
    }

    /// Number of addresses yielded so far.
    pub const fn addresses_read(&self) -> u64 {
        self.addresses
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<u32, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let rest = &self.line[self.cursor..];
            if let Some(skip) = rest.iter().position(|b| !b.is_ascii_whitespace()) {
                let start = self.cursor + skip;
                let len = self.line[start..]
                    .iter()
                    .position(u8::is_ascii_whitespace)
                    .unwrap_or(self.line.len() - start);
                let token = &self.line[start..start + len];
                self.cursor = start + len;

                if let Some(addr) = std::str::from_utf8(token).ok().and_then(parse_address) {
                    self.addresses += 1;
                    return Some(Ok(addr));
                }
                warn!(
                    token = %String::from_utf8_lossy(token),
                    after = self.addresses,
                    "malformed trace token, ending trace"
                );
                self.done = true;
                return None;
            }

            self.line.clear();
            self.cursor = 0;
            match self.reader.read_until(b'\n', &mut self.line) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => {}
                Err(e) => {
                    self.done = true;
                    return Some(Err(TraceError::Read(e)));
                }
            }
        }
    }
}
