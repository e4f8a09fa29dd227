//! Write serializer.
//!
//! A single task owns the write half of every connection and drains one
//! bounded queue. Each request is written and flushed completely before the
//! next is popped, so writes reach sockets in global enqueue order.
//!
//! A failed write detaches the sink and reports the error through the
//! receiver returned by [`WriteQueue::attach`]. The connection's reader
//! watches it, so the dispatcher hears about a dead write half even while
//! the read half stays open.

use super::ConnectionId;
use crate::error::ClientError;
use bytes::Bytes;
use slirc_proto::Message;
use std::collections::HashMap;
use std::io;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, trace, warn};

/// Write half handed to the serializer.
pub type BoxedSink = Box<dyn AsyncWrite + Send + Unpin>;

/// Outbound bytes for one connection, CRLF included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteRequest {
    pub conn: ConnectionId,
    pub bytes: Bytes,
}

impl WriteRequest {
    /// Serialize `msg` for `conn`.
    pub fn new(conn: ConnectionId, msg: &Message) -> Self {
        Self {
            conn,
            bytes: Bytes::from(msg.to_string()),
        }
    }
}

/// Operations accepted by the serializer.
pub enum WriteOp {
    /// Register the write half of a new connection.
    Attach {
        conn: ConnectionId,
        sink: BoxedSink,
        failed: oneshot::Sender<io::Error>,
    },
    /// Write one request.
    Write(WriteRequest),
    /// Shut down and forget a connection's write half.
    Detach { conn: ConnectionId },
}

/// Cloneable producer side of the write queue.
#[derive(Clone, Debug)]
pub struct WriteQueue {
    tx: mpsc::Sender<WriteOp>,
}

impl WriteQueue {
    /// Create a bounded queue; the receiver goes to [`run`].
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<WriteOp>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    async fn push(&self, op: WriteOp) -> Result<(), ClientError> {
        self.tx
            .send(op)
            .await
            .map_err(|_| ClientError::WriteQueueClosed)
    }

    /// Register `sink`; the returned receiver yields the error of the
    /// first failed write, or closes once the sink is detached.
    pub async fn attach(
        &self,
        conn: ConnectionId,
        sink: BoxedSink,
    ) -> Result<oneshot::Receiver<io::Error>, ClientError> {
        let (failed, on_failure) = oneshot::channel();
        self.push(WriteOp::Attach { conn, sink, failed }).await?;
        Ok(on_failure)
    }

    pub async fn detach(&self, conn: ConnectionId) -> Result<(), ClientError> {
        self.push(WriteOp::Detach { conn }).await
    }

    pub async fn write(&self, request: WriteRequest) -> Result<(), ClientError> {
        self.push(WriteOp::Write(request)).await
    }

    /// Serialize and enqueue one message.
    pub async fn send(&self, conn: ConnectionId, msg: &Message) -> Result<(), ClientError> {
        let request = WriteRequest::new(conn, msg);
        trace!(conn = %conn, line = %msg.to_string().trim_end(), "->");
        self.write(request).await
    }
}

/// Drain the write queue until every producer is gone.
pub async fn run(mut rx: mpsc::Receiver<WriteOp>) {
    let mut sinks: HashMap<ConnectionId, Attached> = HashMap::new();

    while let Some(op) = rx.recv().await {
        match op {
            WriteOp::Attach { conn, sink, failed } => {
                if sinks.insert(conn, Attached { sink, failed }).is_some() {
                    warn!(conn = %conn, "Replaced existing write half");
                }
            }
            WriteOp::Write(request) => {
                let Some(attached) = sinks.get_mut(&request.conn) else {
                    debug!(conn = %request.conn, "Dropping write for unknown connection");
                    continue;
                };
                if let Err(e) = write_one(&mut attached.sink, &request.bytes).await {
                    warn!(conn = %request.conn, error = %e, "Write failed, detaching");
                    if let Some(attached) = sinks.remove(&request.conn) {
                        if attached.failed.send(e).is_err() {
                            debug!(conn = %request.conn, "Nobody watching write failures");
                        }
                    }
                }
            }
            WriteOp::Detach { conn } => {
                if let Some(attached) = sinks.remove(&conn) {
                    attached.close(conn).await;
                }
            }
        }
    }

    for (conn, attached) in sinks {
        attached.close(conn).await;
    }
}

struct Attached {
    sink: BoxedSink,
    failed: oneshot::Sender<io::Error>,
}

impl Attached {
    async fn close(mut self, conn: ConnectionId) {
        match self.sink.shutdown().await {
            Ok(()) => debug!(conn = %conn, "Write half closed"),
            Err(e) => debug!(conn = %conn, error = %e, "Shutdown of write half failed"),
        }
    }
}

async fn write_one(sink: &mut BoxedSink, bytes: &[u8]) -> io::Result<()> {
    sink.write_all(bytes).await?;
    sink.flush().await
}
