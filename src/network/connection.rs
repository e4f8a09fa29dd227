//! Per-connection state owned by the dispatcher.

use super::ConnectionId;
use crate::config::ConnectionConfig;
use crate::handlers::HandshakeState;
use crate::state::Session;
use slirc_proto::Capability;
use std::collections::HashSet;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// One live connection: its configuration, session state, handshake
/// progress and the reader task bound to it.
#[derive(Debug)]
pub struct Connection {
    pub id: ConnectionId,
    pub config: ConnectionConfig,
    pub session: Session,
    pub handshake: HandshakeState,
    /// Capabilities the server acknowledged.
    pub caps: HashSet<Capability>,
    cancel: CancellationToken,
    reader: Option<JoinHandle<()>>,
}

impl Connection {
    pub fn new(id: ConnectionId, config: ConnectionConfig) -> Self {
        Self {
            id,
            config,
            session: Session::new(),
            handshake: HandshakeState::default(),
            caps: HashSet::new(),
            cancel: CancellationToken::new(),
            reader: None,
        }
    }

    /// Token the reader task watches.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn set_reader(&mut self, reader: JoinHandle<()>) {
        self.reader = Some(reader);
    }

    /// Bouncer network id, if this connection is bound to one.
    pub fn network_id(&self) -> Option<&str> {
        self.config.network()
    }

    pub fn has_cap(&self, cap: &Capability) -> bool {
        self.caps.contains(cap)
    }

    /// Cancel the reader and wait for it to exit.
    ///
    /// The session is dropped with `self`; the write half must be detached
    /// separately through the write queue.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(reader) = self.reader.take() {
            if let Err(e) = reader.await {
                warn!(conn = %self.id, error = %e, "Reader task panicked");
            }
        }
        debug!(conn = %self.id, "Connection destroyed");
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config() -> ConnectionConfig {
        ConnectionConfig {
            server: "127.0.0.1:6667".to_string(),
            tls: false,
            user: "foo".to_string(),
            nick: "bar".to_string(),
            password: "baz".to_string(),
            real_name: None,
            network_id: Some("net1".to_string()),
            name: None,
        }
    }

    #[tokio::test]
    async fn test_shutdown_waits_for_reader() {
        let mut conn = Connection::new(ConnectionId(1), config());
        let token = conn.cancel_token();
        let (done_tx, done_rx) = tokio::sync::oneshot::channel();
        conn.set_reader(tokio::spawn(async move {
            token.cancelled().await;
            tokio::time::sleep(Duration::from_millis(10)).await;
            let _ = done_tx.send(());
        }));

        conn.shutdown().await;
        assert!(done_rx.await.is_ok());
    }

    #[test]
    fn test_network_id() {
        let conn = Connection::new(ConnectionId(1), config());
        assert_eq!(conn.network_id(), Some("net1"));
        assert_eq!(conn.handshake, HandshakeState::Registering);
    }
}
