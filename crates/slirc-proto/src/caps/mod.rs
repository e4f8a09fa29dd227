//! IRCv3 capability negotiation vocabulary.
//!
//! Only the capabilities a bouncer-aware client requests are named; the rest
//! are carried through as [`Capability::Custom`].
//!
//! # Reference
//! - IRCv3 Capability Negotiation: <https://ircv3.net/specs/extensions/capability-negotiation>

use std::str::FromStr;

use crate::error::MessageParseError;

/// Known IRCv3 capability types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Capability {
    /// SASL authentication
    Sasl,
    /// Notify of away status changes
    AwayNotify,
    /// Bouncer network listing and binding (soju.im/bouncer-networks)
    BouncerNetworks,
    /// Unsolicited BOUNCER NETWORK updates (soju.im/bouncer-networks-notify)
    BouncerNetworksNotify,
    /// Unknown/custom capability
    Custom(String),
}

/// Capabilities requested on every new connection, in request order.
///
/// `sasl` comes first so its ACK (and the `AUTHENTICATE PLAIN` it
/// triggers) precedes the others on the wire.
pub const CLIENT_CAPABILITIES: [Capability; 4] = [
    Capability::Sasl,
    Capability::AwayNotify,
    Capability::BouncerNetworks,
    Capability::BouncerNetworksNotify,
];

impl AsRef<str> for Capability {
    fn as_ref(&self) -> &str {
        match self {
            Self::Sasl => "sasl",
            Self::AwayNotify => "away-notify",
            Self::BouncerNetworks => "soju.im/bouncer-networks",
            Self::BouncerNetworksNotify => "soju.im/bouncer-networks-notify",
            Self::Custom(s) => s,
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl From<&str> for Capability {
    fn from(s: &str) -> Self {
        match s {
            "sasl" => Self::Sasl,
            "away-notify" => Self::AwayNotify,
            "soju.im/bouncer-networks" => Self::BouncerNetworks,
            "soju.im/bouncer-networks-notify" => Self::BouncerNetworksNotify,
            other => Self::Custom(other.to_string()),
        }
    }
}

/// Parse a space-separated capability list from `CAP NAK`/`DEL`/`LS`.
///
/// CAP 3.2 values (`sasl=PLAIN,EXTERNAL`) are stripped to the name, and
/// disable markers (`-away-notify`) are skipped.
pub fn parse_list(list: &str) -> Vec<Capability> {
    list.split_whitespace()
        .filter(|token| !token.starts_with('-'))
        .map(cap_name)
        .collect()
}

/// One entry of a `CAP ACK` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapChange {
    /// The capability is now enabled.
    Enable(Capability),
    /// `-name`: the capability is now disabled.
    Disable(Capability),
}

/// Parse a `CAP ACK` list, keeping disable markers.
pub fn parse_changes(list: &str) -> Vec<CapChange> {
    list.split_whitespace()
        .map(|token| match token.strip_prefix('-') {
            Some(name) => CapChange::Disable(cap_name(name)),
            None => CapChange::Enable(cap_name(token)),
        })
        .collect()
}

fn cap_name(token: &str) -> Capability {
    Capability::from(token.split_once('=').map_or(token, |(name, _)| name))
}

/// Subcommand for CAP (capability negotiation) messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CapSubCommand {
    /// LS - List available capabilities
    LS,
    /// LIST - List currently enabled capabilities
    LIST,
    /// REQ - Request capabilities
    REQ,
    /// ACK - Server acknowledged capabilities
    ACK,
    /// NAK - Server rejected capabilities
    NAK,
    /// END - End capability negotiation
    END,
    /// NEW - Server advertising new capabilities (cap-notify)
    NEW,
    /// DEL - Server removing capabilities (cap-notify)
    DEL,
}

impl CapSubCommand {
    /// Get the string representation of this subcommand.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LS => "LS",
            Self::LIST => "LIST",
            Self::REQ => "REQ",
            Self::ACK => "ACK",
            Self::NAK => "NAK",
            Self::END => "END",
            Self::NEW => "NEW",
            Self::DEL => "DEL",
        }
    }
}

impl FromStr for CapSubCommand {
    type Err = MessageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "LS" => Ok(Self::LS),
            "LIST" => Ok(Self::LIST),
            "REQ" => Ok(Self::REQ),
            "ACK" => Ok(Self::ACK),
            "NAK" => Ok(Self::NAK),
            "END" => Ok(Self::END),
            "NEW" => Ok(Self::NEW),
            "DEL" => Ok(Self::DEL),
            _ => Err(MessageParseError::InvalidSubcommand {
                cmd: "CAP",
                sub: s.to_owned(),
            }),
        }
    }
}

impl std::fmt::Display for CapSubCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
