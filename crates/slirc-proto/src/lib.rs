//! # slirc-proto
//!
//! The protocol half of slirc-client: turning wire lines into messages and
//! back, and the small amount of IRCv3 vocabulary a bouncer-aware client
//! needs.
//!
//! ## Features
//!
//! - nom-based line parsing into prefix, command and parameters
//! - Closed command classification with an explicit "unrecognized" value
//! - Capability names and `CAP` subcommands
//! - SASL PLAIN payload encoding and `AUTHENTICATE` chunking
//! - `soju.im/bouncer-networks` attribute parsing
//! - Optional Tokio line codec
//!
//! ## Parsing
//!
//! ```rust
//! use slirc_proto::{Command, Message, Response};
//!
//! let msg: Message = ":irc.example.net 332 me #general :Welcome here".parse().unwrap();
//! assert_eq!(msg.kind(), Command::Response(Response::RPL_TOPIC));
//! assert_eq!(msg.params, vec!["me", "#general", "Welcome here"]);
//! ```
//!
//! ## Building outbound lines
//!
//! ```rust
//! use slirc_proto::Message;
//!
//! assert_eq!(Message::cap_end().to_string(), "CAP END\r\n");
//! assert_eq!(Message::bouncer_bind("42").to_string(), "BOUNCER BIND 42\r\n");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod bouncer;
pub mod caps;
pub mod command;
pub mod error;
#[cfg(feature = "tokio")]
pub mod line;
pub mod message;
pub mod response;
pub mod sasl;

pub use self::bouncer::{NetworkAttributes, NetworkUpdate};
pub use self::caps::{CapChange, CapSubCommand, Capability};
pub use self::command::Command;
pub use self::error::{MessageParseError, ProtocolError};
#[cfg(feature = "tokio")]
pub use self::line::{LineCodec, MAX_LINE_LEN};
pub use self::message::Message;
pub use self::response::Response;
pub use self::sasl::{
    chunk_response, encode_plain_with_authzid, SaslMechanism, AUTHENTICATE_CONTINUE,
    SASL_CHUNK_SIZE,
};
