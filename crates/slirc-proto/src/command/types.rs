//! The closed set of commands the client acts on.
//!
//! Every token off the wire maps to exactly one [`Command`]. Anything the
//! client has no behavior for is [`Command::Unrecognized`], so handlers can
//! match exhaustively and the dispatch loop drops the rest in one place.
//!
//! # Reference
//! - IRCv3 capability negotiation: <https://ircv3.net/specs/extensions/capability-negotiation>
//! - IRCv3 SASL: <https://ircv3.net/specs/extensions/sasl-3.2>
//! - soju bouncer networks: <https://codeberg.org/emersion/soju/src/branch/master/doc/ext/bouncer-networks.md>

#![allow(non_camel_case_types)]

use crate::response::Response;

/// A classified command token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// A recognized three-digit numeric reply.
    Response(Response),
    /// `CAP` capability negotiation.
    CAP,
    /// `AUTHENTICATE` SASL exchange.
    AUTHENTICATE,
    /// `BOUNCER` network multiplexing (soju.im/bouncer-networks).
    BOUNCER,
    /// `AWAY` status notification (away-notify).
    AWAY,
    /// `PING` keepalive.
    PING,
    /// Syntactically valid but not acted upon.
    Unrecognized,
}

impl Command {
    /// Classify a command token.
    ///
    /// Named commands are matched case-insensitively. Numerics must be
    /// exactly three ASCII digits.
    pub fn classify(token: &str) -> Self {
        if let Some(response) = Response::from_token(token) {
            return Self::Response(response);
        }

        if token.eq_ignore_ascii_case("CAP") {
            Self::CAP
        } else if token.eq_ignore_ascii_case("AUTHENTICATE") {
            Self::AUTHENTICATE
        } else if token.eq_ignore_ascii_case("BOUNCER") {
            Self::BOUNCER
        } else if token.eq_ignore_ascii_case("AWAY") {
            Self::AWAY
        } else if token.eq_ignore_ascii_case("PING") {
            Self::PING
        } else {
            Self::Unrecognized
        }
    }

    /// Whether this command has any handling at all.
    #[inline]
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized)
    }

    /// Name used in logs and error reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Response(r) => r.name(),
            Self::CAP => "CAP",
            Self::AUTHENTICATE => "AUTHENTICATE",
            Self::BOUNCER => "BOUNCER",
            Self::AWAY => "AWAY",
            Self::PING => "PING",
            Self::Unrecognized => "UNRECOGNIZED",
        }
    }
}
