//! Line-based codec for tokio.
//!
//! Splits an inbound byte stream into protocol lines with the terminator
//! removed. Over-long lines are reported and skipped instead of ending the
//! stream, since `FramedRead` stops at the first decoder error.

use bytes::{Buf, BytesMut};
use tokio_util::codec::Decoder;

use crate::error::{self, ProtocolError};

/// Default line limit: 8191 bytes of IRCv3 tags plus a 512 byte body.
pub const MAX_LINE_LEN: usize = 8191 + 512;

/// Line-based decoder.
///
/// Each item is either a line (CRLF/LF stripped, invalid UTF-8 replaced) or
/// a recoverable [`ProtocolError::MessageTooLong`]. Only I/O errors are
/// returned as `Err`.
#[derive(Debug)]
pub struct LineCodec {
    /// Index of next byte to check for newline
    next_index: usize,
    /// Maximum line length
    max_len: usize,
    /// Dropping the tail of an over-long line until the next newline
    discarding: bool,
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::with_max_len(MAX_LINE_LEN)
    }
}

impl LineCodec {
    /// Create a codec with the default limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a codec with a custom max line length (terminator included).
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
            discarding: false,
        }
    }

    fn too_long(&self, actual: usize) -> ProtocolError {
        ProtocolError::MessageTooLong {
            actual,
            limit: self.max_len,
        }
    }
}

impl Decoder for LineCodec {
    type Item = Result<String, ProtocolError>;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<Self::Item>> {
        loop {
            let newline = src[self.next_index..].iter().position(|b| *b == b'\n');

            match newline {
                Some(offset) if self.discarding => {
                    // Tail of a line already reported as too long.
                    src.advance(self.next_index + offset + 1);
                    self.next_index = 0;
                    self.discarding = false;
                }
                Some(offset) => {
                    let line = src.split_to(self.next_index + offset + 1);
                    self.next_index = 0;

                    if line.len() > self.max_len {
                        return Ok(Some(Err(self.too_long(line.len()))));
                    }

                    let text = String::from_utf8_lossy(&line);
                    return Ok(Some(Ok(text.trim_end_matches(['\r', '\n']).to_owned())));
                }
                None if self.discarding => {
                    src.clear();
                    self.next_index = 0;
                    return Ok(None);
                }
                None => {
                    if src.len() > self.max_len {
                        let actual = src.len();
                        src.clear();
                        self.next_index = 0;
                        self.discarding = true;
                        return Ok(Some(Err(self.too_long(actual))));
                    }

                    self.next_index = src.len();
                    return Ok(None);
                }
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> error::Result<Option<Self::Item>> {
        if let Some(item) = self.decode(src)? {
            return Ok(Some(item));
        }

        // Peer closed mid-line: hand over what we have as the last line.
        if src.is_empty() || self.discarding {
            src.clear();
            return Ok(None);
        }

        let line = src.split();
        self.next_index = 0;
        let text = String::from_utf8_lossy(&line);
        Ok(Some(Ok(text.trim_end_matches('\r').to_owned())))
    }
}
