//! Events consumed by the dispatcher.
//!
//! Reader tasks, connect tasks and the bridge are the producers; the
//! dispatcher is the only consumer.

use crate::config::ConnectionConfig;
use crate::network::{BoxedStream, ConnectionId};
use slirc_proto::{Message, ProtocolError};
use std::fmt;

pub enum Event {
    /// Open a connection with this configuration.
    Connect(ConnectionConfig),
    /// A connect task finished its handshake with the transport.
    Established {
        conn: ConnectionId,
        config: ConnectionConfig,
        stream: BoxedStream,
    },
    /// A connect task gave up.
    ConnectFailed {
        conn: ConnectionId,
        config: ConnectionConfig,
        error: std::io::Error,
    },
    /// One parsed inbound line.
    Message { conn: ConnectionId, msg: Message },
    /// The reader hit EOF (`error: None`) or a transport error.
    Closed {
        conn: ConnectionId,
        error: Option<ProtocolError>,
    },
    /// A log line from the scripting side.
    Log(String),
    /// Tear everything down and stop the dispatcher.
    Shutdown,
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connect(config) => f.debug_tuple("Connect").field(&config.server).finish(),
            Self::Established { conn, .. } => {
                f.debug_struct("Established").field("conn", conn).finish()
            }
            Self::ConnectFailed { conn, error, .. } => f
                .debug_struct("ConnectFailed")
                .field("conn", conn)
                .field("error", error)
                .finish(),
            Self::Message { conn, msg } => f
                .debug_struct("Message")
                .field("conn", conn)
                .field("msg", msg)
                .finish(),
            Self::Closed { conn, error } => f
                .debug_struct("Closed")
                .field("conn", conn)
                .field("error", error)
                .finish(),
            Self::Log(text) => f.debug_tuple("Log").field(text).finish(),
            Self::Shutdown => f.write_str("Shutdown"),
        }
    }
}
