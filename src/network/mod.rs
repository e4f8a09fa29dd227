//! Network module.
//!
//! Contains the connector (TCP/TLS establishment), per-connection state,
//! reader tasks and the global write serializer.

mod connection;
mod connector;
mod reader;
pub mod writer;

pub use connection::Connection;
pub use connector::{AsyncStream, BoxedStream, Connector, TcpConnector};
pub use reader::spawn_reader;
pub use writer::{WriteOp, WriteQueue, WriteRequest};

use std::fmt;

/// Opaque handle naming one connection in events and write requests.
///
/// Allocated by the dispatcher from a monotonically increasing counter and
/// never reused, so stale events for a destroyed connection cannot reach a
/// newer one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(pub u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}
