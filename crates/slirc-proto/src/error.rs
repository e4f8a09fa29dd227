//! Error types for the IRC protocol library.
//!
//! Wire-level failures only. None of these are fatal to a session: a line
//! that fails to parse is dropped and the stream continues.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Top-level protocol errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Message exceeded maximum allowed length.
    #[error("message too long: {actual} bytes (limit: {limit})")]
    MessageTooLong {
        /// Actual message length.
        actual: usize,
        /// Maximum allowed length.
        limit: usize,
    },

    /// Failed to parse an IRC message.
    #[error("invalid message: {string:?}: {cause}")]
    InvalidMessage {
        /// The invalid message string.
        string: String,
        /// The reason parsing failed.
        cause: MessageParseError,
    },
}

/// Reasons a single line could not become a [`Message`](crate::Message).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MessageParseError {
    /// The line was empty (or only whitespace and line terminators).
    #[error("empty message")]
    EmptyMessage,

    /// No command token followed the optional tags and prefix.
    #[error("missing command")]
    MissingCommand,

    /// A command's subcommand token was not one it defines.
    #[error("invalid {cmd} subcommand: {sub}")]
    InvalidSubcommand {
        /// The command name.
        cmd: &'static str,
        /// The offending subcommand.
        sub: String,
    },

    /// The parser stopped at `position`.
    #[error("parse error at position {position}")]
    ParseContext {
        /// Byte offset where parsing failed.
        position: usize,
    },
}

impl ProtocolError {
    /// Build an [`ProtocolError::InvalidMessage`] for `line`.
    pub(crate) fn invalid(line: &str, cause: MessageParseError) -> Self {
        Self::InvalidMessage {
            string: line.to_owned(),
            cause,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_message_display() {
        let err = ProtocolError::invalid("", MessageParseError::EmptyMessage);
        assert_eq!(err.to_string(), "invalid message: \"\": empty message");
    }

    #[test]
    fn test_too_long_display() {
        let err = ProtocolError::MessageTooLong {
            actual: 600,
            limit: 512,
        };
        assert_eq!(err.to_string(), "message too long: 600 bytes (limit: 512)");
    }
}
