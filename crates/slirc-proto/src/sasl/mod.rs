//! SASL helpers for the IRCv3 `AUTHENTICATE` exchange.
//!
//! # Reference
//! - IRCv3 SASL: <https://ircv3.net/specs/extensions/sasl-3.2>
//! - RFC 4616 (PLAIN): <https://tools.ietf.org/html/rfc4616>

mod plain;

pub use plain::encode_plain_with_authzid;

/// Maximum length of a single SASL message chunk (400 bytes).
///
/// SASL responses that exceed this length must be split into multiple
/// AUTHENTICATE commands.
pub const SASL_CHUNK_SIZE: usize = 400;

/// The server's empty challenge, and the client's "empty chunk" marker.
pub const AUTHENTICATE_CONTINUE: &str = "+";

/// Supported SASL authentication mechanisms.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SaslMechanism {
    /// PLAIN mechanism (RFC 4616) - simple username/password.
    Plain,
}

impl SaslMechanism {
    /// Returns the canonical name of this mechanism.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain => "PLAIN",
        }
    }
}

impl std::fmt::Display for SaslMechanism {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split an encoded SASL response into `AUTHENTICATE` payloads.
///
/// Chunks are at most [`SASL_CHUNK_SIZE`] bytes. When the final chunk is
/// exactly that long, a lone `+` follows so the server knows the response
/// is complete.
pub fn chunk_response(encoded: &str) -> Vec<&str> {
    let mut chunks: Vec<&str> = encoded
        .as_bytes()
        .chunks(SASL_CHUNK_SIZE)
        // base64 output is ASCII, so chunk boundaries are char boundaries.
        .filter_map(|chunk| std::str::from_utf8(chunk).ok())
        .collect();

    if chunks.last().map_or(true, |last| last.len() == SASL_CHUNK_SIZE) {
        chunks.push(AUTHENTICATE_CONTINUE);
    }

    chunks
}
