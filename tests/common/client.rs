//! Client harness.
//!
//! Owns a [`Dispatcher`] wired to an in-memory connector and a running
//! write serializer. Events are handled only when the test asks, so every
//! state check happens at a known point.

use super::server::TestServer;
use async_trait::async_trait;
use slirc_client::network::{BoxedStream, writer};
use slirc_client::{ConnectionConfig, ConnectionId, Connector, Dispatcher, Event, WriteQueue};
use std::io;
use std::ops::ControlFlow;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite, DuplexStream, ReadBuf, duplex};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;

/// Servers named `fail:<port>` refuse the connection.
pub const FAILING_SERVER: &str = "fail:6667";

/// Connects to this server never finish.
pub const STALLING_SERVER: &str = "stall:6667";

/// This server's stream rejects every write and never yields a read.
pub const DEAF_SERVER: &str = "deaf:6667";

/// Stream whose write half is dead while its read half stays open.
struct DeafStream;

impl AsyncRead for DeafStream {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Poll::Pending
    }
}

impl AsyncWrite for DeafStream {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Poll::Ready(Err(io::ErrorKind::BrokenPipe.into()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

/// Reports the config of a stalled connect once it is abandoned.
struct AbandonGuard {
    config: ConnectionConfig,
    abandoned: mpsc::UnboundedSender<ConnectionConfig>,
}

impl Drop for AbandonGuard {
    fn drop(&mut self) {
        let _ = self.abandoned.send(self.config.clone());
    }
}

/// Connector handing out duplex pipes; the far ends go to the test.
pub struct MemoryConnector {
    servers: mpsc::UnboundedSender<(ConnectionConfig, DuplexStream)>,
    abandoned: mpsc::UnboundedSender<ConnectionConfig>,
}

#[async_trait]
impl Connector for MemoryConnector {
    async fn connect(&self, config: &ConnectionConfig) -> io::Result<BoxedStream> {
        match config.server.as_str() {
            FAILING_SERVER => {
                return Err(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"));
            }
            DEAF_SERVER => return Ok(Box::new(DeafStream)),
            STALLING_SERVER => {
                let _guard = AbandonGuard {
                    config: config.clone(),
                    abandoned: self.abandoned.clone(),
                };
                return std::future::pending().await;
            }
            _ => {}
        }
        let (near, far) = duplex(16 * 1024);
        self.servers
            .send((config.clone(), far))
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "test gone"))?;
        Ok(Box::new(near))
    }
}

pub fn config(network_id: Option<&str>) -> ConnectionConfig {
    ConnectionConfig {
        server: "bnc.example.org:6697".to_string(),
        tls: false,
        user: "foo".to_string(),
        nick: "bar".to_string(),
        password: "baz".to_string(),
        real_name: None,
        network_id: network_id.map(str::to_owned),
        name: None,
    }
}

pub struct TestClient {
    pub dispatcher: Dispatcher,
    pub events_tx: mpsc::Sender<Event>,
    events: mpsc::Receiver<Event>,
    servers: mpsc::UnboundedReceiver<(ConnectionConfig, DuplexStream)>,
    abandoned: mpsc::UnboundedReceiver<ConnectionConfig>,
    #[allow(dead_code)]
    writer: JoinHandle<()>,
}

impl TestClient {
    pub fn new() -> Self {
        let (events_tx, events) = mpsc::channel(64);
        let (writes, writes_rx) = WriteQueue::new(64);
        let writer = tokio::spawn(writer::run(writes_rx));
        let (servers_tx, servers) = mpsc::unbounded_channel();
        let (abandoned_tx, abandoned) = mpsc::unbounded_channel();
        let connector = Arc::new(MemoryConnector {
            servers: servers_tx,
            abandoned: abandoned_tx,
        });

        Self {
            dispatcher: Dispatcher::new(events_tx.clone(), writes, connector),
            events_tx,
            events,
            servers,
            abandoned,
            writer,
        }
    }

    /// Split into the parts needed to drive [`Dispatcher::run`] directly.
    #[allow(dead_code)]
    pub fn into_parts(
        self,
    ) -> (
        Dispatcher,
        mpsc::Sender<Event>,
        mpsc::Receiver<Event>,
        mpsc::UnboundedReceiver<(ConnectionConfig, DuplexStream)>,
        JoinHandle<()>,
    ) {
        (
            self.dispatcher,
            self.events_tx,
            self.events,
            self.servers,
            self.writer,
        )
    }

    /// Handle the next queued event.
    pub async fn pump(&mut self) -> anyhow::Result<ControlFlow<()>> {
        let event = timeout(Duration::from_secs(5), self.events.recv())
            .await?
            .ok_or_else(|| anyhow::anyhow!("event queue closed"))?;
        Ok(self.dispatcher.handle(event).await?)
    }

    /// Handle the next `n` queued events.
    pub async fn pump_n(&mut self, n: usize) -> anyhow::Result<()> {
        for _ in 0..n {
            self.pump().await?;
        }
        Ok(())
    }

    /// Server side of the next connection the connector opened.
    pub async fn accept(&mut self) -> anyhow::Result<TestServer> {
        let (config, stream) = timeout(Duration::from_secs(5), self.servers.recv())
            .await?
            .ok_or_else(|| anyhow::anyhow!("connector dropped"))?;
        Ok(TestServer::new(config, stream))
    }

    /// Config of the next stalled connect that was abandoned.
    #[allow(dead_code)]
    pub async fn abandoned(&mut self) -> anyhow::Result<ConnectionConfig> {
        timeout(Duration::from_secs(5), self.abandoned.recv())
            .await?
            .ok_or_else(|| anyhow::anyhow!("connector dropped"))
    }

    /// Issue a connect, handle its `Established`, and return the new id
    /// with its server.
    pub async fn connect(
        &mut self,
        config: ConnectionConfig,
    ) -> anyhow::Result<(ConnectionId, TestServer)> {
        self.dispatcher.handle(Event::Connect(config)).await?;
        self.pump().await?;
        let server = self.accept().await?;
        let id = self.newest().ok_or_else(|| anyhow::anyhow!("no connection"))?;
        Ok((id, server))
    }

    /// Most recently established connection.
    pub fn newest(&self) -> Option<ConnectionId> {
        self.dispatcher.connections().map(|c| c.id).max()
    }
}
