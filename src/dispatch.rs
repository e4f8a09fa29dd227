//! Dispatch loop.
//!
//! The [`Dispatcher`] is the single consumer of the event queue and the only
//! code that mutates connections, sessions and handshake state. Connect
//! tasks and reader tasks report back through events; outbound bytes leave
//! through the write queue.

use crate::config::ConnectionConfig;
use crate::error::{ClientError, HandlerError};
use crate::event::Event;
use crate::handlers::{self, BouncerAction, Context, Holder, bouncer};
use crate::network::{BoxedStream, Connection, ConnectionId, Connector, WriteQueue, spawn_reader};
use crate::telemetry::spans;
use slirc_proto::{Command, Message, ProtocolError};
use std::collections::HashMap;
use std::ops::ControlFlow;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, trace, warn};

pub struct Dispatcher {
    /// Established connections.
    connections: HashMap<ConnectionId, Connection>,
    /// Connect tasks in flight.
    pending: HashMap<ConnectionId, PendingConnect>,
    events: mpsc::Sender<Event>,
    writes: WriteQueue,
    connector: Arc<dyn Connector>,
    next_id: u64,
}

/// A connect task in flight.
struct PendingConnect {
    /// Network id the connection will hold.
    network_id: Option<String>,
    cancel: CancellationToken,
}

impl Dispatcher {
    /// `events` is the producer side of the queue later passed to [`run`];
    /// connect and reader tasks get clones of it.
    ///
    /// [`run`]: Dispatcher::run
    pub fn new(
        events: mpsc::Sender<Event>,
        writes: WriteQueue,
        connector: Arc<dyn Connector>,
    ) -> Self {
        Self {
            connections: HashMap::new(),
            pending: HashMap::new(),
            events,
            writes,
            connector,
            next_id: 1,
        }
    }

    /// Consume events until [`Event::Shutdown`] or the queue closes, then
    /// destroy every connection.
    pub async fn run(&mut self, mut rx: mpsc::Receiver<Event>) -> Result<(), ClientError> {
        let result = loop {
            let Some(event) = rx.recv().await else {
                break Ok(());
            };
            match self.handle(event).await {
                Ok(ControlFlow::Continue(())) => {}
                Ok(ControlFlow::Break(())) => break Ok(()),
                Err(e) => break Err(e),
            }
        };

        self.shutdown_all().await;
        result
    }

    /// Process one event.
    pub async fn handle(&mut self, event: Event) -> Result<ControlFlow<()>, ClientError> {
        match event {
            Event::Connect(config) => self.on_connect(config),
            Event::Established { conn, config, stream } => {
                self.on_established(conn, config, stream).await?
            }
            Event::ConnectFailed { conn, config, error } => {
                self.pending.remove(&conn);
                warn!(conn = %conn, server = %config.server, error = %error, "Connect failed");
            }
            Event::Message { conn, msg } => self.on_message(conn, msg).await?,
            Event::Closed { conn, error } => self.on_closed(conn, error).await?,
            Event::Log(text) => info!(target: "slirc::script", "{}", text),
            Event::Shutdown => {
                info!("Shutdown requested");
                return Ok(ControlFlow::Break(()));
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    pub fn connection(&self, conn: ConnectionId) -> Option<&Connection> {
        self.connections.get(&conn)
    }

    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Who holds `network_id`, established connections first.
    pub fn find_network(&self, network_id: &str) -> Option<Holder> {
        self.connections
            .values()
            .find(|c| c.network_id() == Some(network_id))
            .map(|c| Holder::Active(c.id))
            .or_else(|| {
                self.pending
                    .iter()
                    .find(|(_, p)| p.network_id.as_deref() == Some(network_id))
                    .map(|(conn, _)| Holder::Pending(*conn))
            })
    }

    fn allocate_id(&mut self) -> ConnectionId {
        let id = ConnectionId(self.next_id);
        self.next_id += 1;
        id
    }

    fn on_connect(&mut self, config: ConnectionConfig) {
        if let Some(network_id) = config.network() {
            if let Some(holder) = self.find_network(network_id) {
                warn!(network = %network_id, holder = ?holder, "Network already connected, ignoring");
                return;
            }
        }

        let conn = self.allocate_id();
        let cancel = CancellationToken::new();
        self.pending.insert(
            conn,
            PendingConnect {
                network_id: config.network().map(str::to_owned),
                cancel: cancel.clone(),
            },
        );
        info!(conn = %conn, server = %config.server, network = ?config.network_id, "Connecting");

        let connector = Arc::clone(&self.connector);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                result = connector.connect(&config) => Some(result),
            };
            let Some(result) = result else {
                debug!(conn = %conn, "Connect cancelled");
                return;
            };

            let event = match result {
                Ok(stream) => Event::Established { conn, config, stream },
                Err(error) => Event::ConnectFailed { conn, config, error },
            };
            if events.send(event).await.is_err() {
                debug!(conn = %conn, "Dispatcher gone, dropping connect result");
            }
        });
    }

    async fn on_established(
        &mut self,
        conn: ConnectionId,
        config: ConnectionConfig,
        stream: BoxedStream,
    ) -> Result<(), ClientError> {
        if self.pending.remove(&conn).is_none() {
            // Network deleted while the connect task was running.
            debug!(conn = %conn, "Connection no longer wanted, closing");
            return Ok(());
        }

        let mut connection = Connection::new(conn, config);
        let (read, write) = tokio::io::split(stream);
        let write_failed = self.writes.attach(conn, Box::new(write)).await?;
        connection.set_reader(spawn_reader(
            conn,
            read,
            self.events.clone(),
            connection.cancel_token(),
            write_failed,
        ));

        handlers::send_registration(&self.writes, &connection).await?;
        info!(conn = %conn, server = %connection.config.server, "Connected");
        self.connections.insert(conn, connection);
        Ok(())
    }

    async fn on_message(&mut self, conn: ConnectionId, msg: Message) -> Result<(), ClientError> {
        let kind = msg.kind();
        if !kind.is_recognized() {
            trace!(conn = %conn, command = %msg.command, "Dropping unrecognized command");
            return Ok(());
        }

        if kind == Command::BOUNCER {
            return self.on_bouncer(conn, &msg).await;
        }

        let Some(connection) = self.connections.get_mut(&conn) else {
            debug!(conn = %conn, "Message for unknown connection");
            return Ok(());
        };

        let mut ctx = Context::new(connection, &self.writes);
        let result = handlers::handle(&mut ctx, &msg)
            .instrument(spans::message(conn, kind.name()))
            .await;

        match result {
            Ok(()) => Ok(()),
            Err(HandlerError::Fatal(e)) => Err(e),
            Err(e) => {
                debug!(conn = %conn, code = e.error_code(), error = %e, "Message dropped");
                Ok(())
            }
        }
    }

    async fn on_bouncer(&mut self, conn: ConnectionId, msg: &Message) -> Result<(), ClientError> {
        let Some(base) = self.connections.get(&conn).map(|c| c.config.clone()) else {
            debug!(conn = %conn, "BOUNCER for unknown connection");
            return Ok(());
        };

        let update = match bouncer::network_update(msg) {
            Ok(Some(update)) => update,
            Ok(None) => {
                trace!(conn = %conn, "Ignoring BOUNCER subcommand");
                return Ok(());
            }
            Err(e) => {
                debug!(conn = %conn, code = e.error_code(), error = %e, "Message dropped");
                return Ok(());
            }
        };

        let holder = self.find_network(update.id());
        match bouncer::plan(update, holder, &base) {
            BouncerAction::Spawn(config) => {
                info!(
                    conn = %conn,
                    network = ?config.network_id,
                    name = ?config.name,
                    "Bouncer network announced"
                );
                self.on_connect(config);
            }
            BouncerAction::Destroy(Holder::Active(target)) => {
                info!(conn = %target, "Bouncer network deleted");
                self.destroy(target).await?;
            }
            BouncerAction::Destroy(Holder::Pending(target)) => {
                info!(conn = %target, "Bouncer network deleted before connecting");
                if let Some(pending) = self.pending.remove(&target) {
                    pending.cancel.cancel();
                }
            }
            BouncerAction::Ignore => {}
        }
        Ok(())
    }

    async fn on_closed(
        &mut self,
        conn: ConnectionId,
        error: Option<ProtocolError>,
    ) -> Result<(), ClientError> {
        let Some(connection) = self.connections.get(&conn) else {
            return Ok(());
        };

        match &error {
            Some(e) => warn!(conn = %conn, server = %connection.config.server, error = %e, "Connection lost"),
            None => warn!(conn = %conn, server = %connection.config.server, "Connection closed by peer"),
        }
        self.destroy(conn).await
    }

    /// Remove a connection: stop its reader, detach its write half and drop
    /// its session.
    async fn destroy(&mut self, conn: ConnectionId) -> Result<(), ClientError> {
        let Some(connection) = self.connections.remove(&conn) else {
            return Ok(());
        };
        connection.shutdown().await;
        self.writes.detach(conn).await
    }

    async fn shutdown_all(&mut self) {
        for (_, pending) in self.pending.drain() {
            pending.cancel.cancel();
        }
        let ids: Vec<ConnectionId> = self.connections.keys().copied().collect();
        for conn in ids {
            if let Err(e) = self.destroy(conn).await {
                debug!(conn = %conn, error = %e, "Detach during shutdown failed");
            }
        }
    }
}
