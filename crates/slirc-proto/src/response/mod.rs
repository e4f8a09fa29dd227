//! IRC numeric replies the client understands.
//!
//! Only the numerics with behavior (or a reserved hook) in the client are
//! listed; every other three-digit code classifies as unrecognized.
//!
//! # Reference
//! - Modern IRC documentation: <https://modern.ircdocs.horse/>

#![allow(non_camel_case_types)]

/// IRC server response code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Response {
    // === Connection Registration (001-099) ===
    /// 001 - Welcome to the IRC network
    RPL_WELCOME = 1,
    /// 002 - Your host is running version
    RPL_YOURHOST = 2,
    /// 003 - Server creation date
    RPL_CREATED = 3,
    /// 004 - Server info (name, version, user modes, channel modes)
    RPL_MYINFO = 4,
    /// 005 - Server supported features (ISUPPORT)
    RPL_ISUPPORT = 5,

    // === Channel state ===
    /// 332 - Channel topic
    RPL_TOPIC = 332,
    /// 353 - Names list
    RPL_NAMREPLY = 353,

    // === SASL (900-908) ===
    /// 900 - Logged in as account
    RPL_LOGGEDIN = 900,
    /// 903 - SASL authentication successful
    RPL_SASLSUCCESS = 903,
    /// 904 - SASL authentication failed
    ERR_SASLFAIL = 904,
    /// 905 - SASL message too long
    ERR_SASLTOOLONG = 905,
    /// 906 - SASL authentication aborted
    ERR_SASLABORTED = 906,
}

impl Response {
    /// Look up a response by numeric code.
    pub fn from_code(code: u16) -> Option<Self> {
        Some(match code {
            1 => Self::RPL_WELCOME,
            2 => Self::RPL_YOURHOST,
            3 => Self::RPL_CREATED,
            4 => Self::RPL_MYINFO,
            5 => Self::RPL_ISUPPORT,
            332 => Self::RPL_TOPIC,
            353 => Self::RPL_NAMREPLY,
            900 => Self::RPL_LOGGEDIN,
            903 => Self::RPL_SASLSUCCESS,
            904 => Self::ERR_SASLFAIL,
            905 => Self::ERR_SASLTOOLONG,
            906 => Self::ERR_SASLABORTED,
            _ => return None,
        })
    }

    /// Parse a wire token; only exactly three ASCII digits qualify.
    pub fn from_token(token: &str) -> Option<Self> {
        if token.len() != 3 || !token.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        token.parse().ok().and_then(Self::from_code)
    }

    /// Numeric code.
    #[inline]
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Whether this is one of the 001-005 registration replies.
    pub fn is_registration(&self) -> bool {
        self.code() <= 5
    }

    /// Whether this reports a SASL failure.
    pub fn is_sasl_failure(&self) -> bool {
        matches!(
            self,
            Self::ERR_SASLFAIL | Self::ERR_SASLTOOLONG | Self::ERR_SASLABORTED
        )
    }

    /// Symbolic name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RPL_WELCOME => "RPL_WELCOME",
            Self::RPL_YOURHOST => "RPL_YOURHOST",
            Self::RPL_CREATED => "RPL_CREATED",
            Self::RPL_MYINFO => "RPL_MYINFO",
            Self::RPL_ISUPPORT => "RPL_ISUPPORT",
            Self::RPL_TOPIC => "RPL_TOPIC",
            Self::RPL_NAMREPLY => "RPL_NAMREPLY",
            Self::RPL_LOGGEDIN => "RPL_LOGGEDIN",
            Self::RPL_SASLSUCCESS => "RPL_SASLSUCCESS",
            Self::ERR_SASLFAIL => "ERR_SASLFAIL",
            Self::ERR_SASLTOOLONG => "ERR_SASLTOOLONG",
            Self::ERR_SASLABORTED => "ERR_SASLABORTED",
        }
    }
}
