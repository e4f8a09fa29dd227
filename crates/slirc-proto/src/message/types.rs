use crate::caps::{CapSubCommand, Capability};
use crate::command::Command;
use crate::sasl::SaslMechanism;

/// An owned IRC message.
///
/// The command is kept as the raw token; [`Message::kind`] classifies it.
///
/// # Example
///
/// ```
/// use slirc_proto::{Command, Message};
///
/// let msg: Message = ":alice!a@host AWAY :lunch".parse().unwrap();
/// assert_eq!(msg.kind(), Command::AWAY);
/// assert_eq!(msg.source_nick(), Some("alice"));
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Message {
    /// Message source (e.g., `nick!user@host` or a server name).
    pub prefix: Option<String>,
    /// The command token as it appeared on the wire.
    pub command: String,
    /// Parameters, left to right, trailing included.
    pub params: Vec<String>,
}

impl Message {
    /// Create an outbound message with no prefix.
    pub fn new<I, S>(command: &str, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefix: None,
            command: command.to_owned(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// Classify the command token.
    #[inline]
    pub fn kind(&self) -> Command {
        Command::classify(&self.command)
    }

    /// Parameter at `idx`, if present.
    #[inline]
    pub fn param(&self, idx: usize) -> Option<&str> {
        self.params.get(idx).map(String::as_str)
    }

    /// The nick part of the source: text before the first `!`, or the whole
    /// source when there is none.
    pub fn source_nick(&self) -> Option<&str> {
        self.prefix
            .as_deref()
            .map(|source| source.split_once('!').map_or(source, |(nick, _)| nick))
    }

    /// `CAP REQ :<cap>`
    pub fn cap_req(cap: &Capability) -> Self {
        Self::new("CAP", [CapSubCommand::REQ.as_str(), cap.as_ref()])
    }

    /// `CAP END`
    pub fn cap_end() -> Self {
        Self::new("CAP", [CapSubCommand::END.as_str()])
    }

    /// `AUTHENTICATE <mechanism>`
    pub fn authenticate_mechanism(mechanism: &SaslMechanism) -> Self {
        Self::new("AUTHENTICATE", [mechanism.as_str()])
    }

    /// `AUTHENTICATE <data>` for one chunk of an encoded response.
    pub fn authenticate(data: &str) -> Self {
        Self::new("AUTHENTICATE", [data])
    }

    /// `BOUNCER BIND <network_id>`
    pub fn bouncer_bind(network_id: &str) -> Self {
        Self::new("BOUNCER", ["BIND", network_id])
    }

    /// `BOUNCER LISTNETWORKS`
    pub fn bouncer_listnetworks() -> Self {
        Self::new("BOUNCER", ["LISTNETWORKS"])
    }

    /// `NICK <nick>`
    pub fn nick(nick: &str) -> Self {
        Self::new("NICK", [nick])
    }

    /// `USER <user> 0 * :<real name>`
    pub fn user(user: &str, real_name: &str) -> Self {
        Self::new("USER", [user, "0", "*", real_name])
    }

    /// `PONG :<token>`
    pub fn pong(token: &str) -> Self {
        Self::new("PONG", [token])
    }
}
