//! Message parsing implementation.
//!
//! This module implements `FromStr` for `Message` using the nom-based parser.

use std::str::FromStr;

use crate::error::{MessageParseError, ProtocolError};

use super::nom_parser::ParsedMessage;
use super::types::Message;

impl Message {
    /// Parse a single protocol line. A trailing CRLF is tolerated.
    pub fn parse(line: &str) -> Result<Message, ProtocolError> {
        line.parse()
    }
}

impl FromStr for Message {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Message, Self::Err> {
        if s.trim_end_matches(['\r', '\n']).trim().is_empty() {
            return Err(ProtocolError::invalid(s, MessageParseError::EmptyMessage));
        }

        let parsed = ParsedMessage::parse(s).map_err(|position| {
            let cause = if position >= s.trim_end_matches(['\r', '\n']).len() {
                MessageParseError::MissingCommand
            } else {
                MessageParseError::ParseContext { position }
            };
            ProtocolError::invalid(s, cause)
        })?;

        Ok(Message {
            prefix: parsed.prefix.map(str::to_owned),
            command: parsed.command.to_owned(),
            params: parsed.params.iter().map(|p| (*p).to_owned()).collect(),
        })
    }
}
