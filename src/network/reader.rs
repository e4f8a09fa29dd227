//! Reader tasks.
//!
//! One task per connection: frame lines, parse them, and hand them to the
//! dispatcher in stream order. Readers never touch session state.
//!
//! A reader also reports a failed write on its connection, since the read
//! half of a split stream can outlive a dead write half.

use super::ConnectionId;
use crate::event::Event;
use futures_util::StreamExt;
use slirc_proto::{LineCodec, Message, ProtocolError};
use std::io;
use tokio::io::AsyncRead;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::codec::FramedRead;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, trace};

/// Spawn the reader for `conn`.
///
/// `write_failed` is the receiver from [`WriteQueue::attach`]; an error on
/// it closes the connection like a read error would.
///
/// The task ends after sending [`Event::Closed`], when the event queue is
/// gone, or as soon as `cancel` fires, whichever comes first.
///
/// [`WriteQueue::attach`]: super::WriteQueue::attach
pub fn spawn_reader<R>(
    conn: ConnectionId,
    read: R,
    events: mpsc::Sender<Event>,
    cancel: CancellationToken,
    write_failed: oneshot::Receiver<io::Error>,
) -> JoinHandle<()>
where
    R: AsyncRead + Send + Unpin + 'static,
{
    let span = crate::telemetry::spans::connection(conn);
    tokio::spawn(read_loop(conn, read, events, cancel, write_failed).instrument(span))
}

async fn read_loop<R>(
    conn: ConnectionId,
    read: R,
    events: mpsc::Sender<Event>,
    cancel: CancellationToken,
    write_failed: oneshot::Receiver<io::Error>,
) where
    R: AsyncRead + Unpin,
{
    let mut lines = FramedRead::new(read, LineCodec::new());
    // A detached sink drops the sender without an error; that never fires.
    let write_failure = async move {
        match write_failed.await {
            Ok(e) => e,
            Err(_) => std::future::pending().await,
        }
    };
    tokio::pin!(write_failure);

    loop {
        let event = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            e = &mut write_failure => Event::Closed {
                conn,
                error: Some(ProtocolError::Io(e)),
            },
            next = lines.next() => match next {
                Some(Ok(Ok(line))) => {
                    trace!(line = %line, "<-");
                    match Message::parse(&line) {
                        Ok(msg) => Event::Message { conn, msg },
                        Err(e) => {
                            debug!(error = %e, "Skipping malformed line");
                            continue;
                        }
                    }
                }
                Some(Ok(Err(e))) => {
                    debug!(error = %e, "Skipping oversized line");
                    continue;
                }
                Some(Err(e)) => Event::Closed {
                    conn,
                    error: Some(e),
                },
                None => Event::Closed { conn, error: None },
            },
        };

        let closing = matches!(event, Event::Closed { .. });

        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            sent = events.send(event) => {
                if sent.is_err() {
                    break;
                }
            }
        }

        if closing {
            break;
        }
    }

    debug!("Reader finished");
}
