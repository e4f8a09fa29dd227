//! Tracing setup and span constructors.

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber, honouring `RUST_LOG` (default `info`).
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();
}

/// Standardized span constructors for client observability.
pub mod spans {
    use crate::network::ConnectionId;
    use tracing::{Span, info_span};

    /// Create a span for a connection's reader task.
    pub fn connection(conn: ConnectionId) -> Span {
        info_span!("connection", conn = %conn)
    }

    /// Create a span for handling one inbound message.
    pub fn message(conn: ConnectionId, command: &str) -> Span {
        info_span!("message", conn = %conn, command = %command)
    }
}
