//! Protocol handlers.
//!
//! Each handler gets a [`Context`] for the connection the message arrived
//! on. Routing is one exhaustive match over [`Command`]; `BOUNCER` needs the
//! whole connection table and is routed by the dispatcher instead.

pub mod bouncer;
mod cap;
mod channel;
mod registration;
mod user_status;

pub use bouncer::{BouncerAction, Holder};
pub use cap::HandshakeState;
pub use registration::send_registration;

use crate::error::{HandlerError, HandlerResult};
use crate::network::{Connection, WriteQueue};
use slirc_proto::{Command, Message, Response};

/// Handler context passed to each message handler.
pub struct Context<'a> {
    /// The connection the message arrived on.
    pub conn: &'a mut Connection,
    /// Outbound queue.
    pub writes: &'a WriteQueue,
}

impl<'a> Context<'a> {
    pub fn new(conn: &'a mut Connection, writes: &'a WriteQueue) -> Self {
        Self { conn, writes }
    }

    /// Enqueue a message on this connection.
    #[inline]
    pub async fn send(&self, msg: &Message) -> Result<(), HandlerError> {
        self.writes.send(self.conn.id, msg).await?;
        Ok(())
    }
}

/// Apply one recognized message to its connection.
pub async fn handle(ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
    match msg.kind() {
        Command::CAP => cap::handle_cap(ctx, msg).await,
        Command::AUTHENTICATE => cap::handle_authenticate(ctx, msg).await,
        Command::AWAY => user_status::handle_away(ctx, msg),
        Command::PING => registration::handle_ping(ctx, msg).await,
        Command::Response(response) => handle_response(ctx, response, msg).await,
        Command::BOUNCER | Command::Unrecognized => Ok(()),
    }
}

async fn handle_response(
    ctx: &mut Context<'_>,
    response: Response,
    msg: &Message,
) -> HandlerResult {
    match response {
        Response::RPL_TOPIC => channel::handle_topic(ctx, msg),
        Response::RPL_NAMREPLY => channel::handle_names(ctx, msg),
        Response::RPL_WELCOME => registration::handle_welcome(ctx, msg).await,
        Response::RPL_LOGGEDIN | Response::RPL_SASLSUCCESS => {
            cap::observe_sasl_success(ctx, response, msg);
            Ok(())
        }
        r if r.is_registration() => {
            registration::observe(ctx, response, msg);
            Ok(())
        }
        r if r.is_sasl_failure() => {
            cap::observe_sasl_failure(ctx, response, msg);
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::ConnectionConfig;
    use crate::network::writer::WriteOp;
    use crate::network::{Connection, ConnectionId, WriteQueue};
    use tokio::sync::mpsc;

    pub fn config(network_id: Option<&str>) -> ConnectionConfig {
        ConnectionConfig {
            server: "bnc.example.org:6697".to_string(),
            tls: true,
            user: "foo".to_string(),
            nick: "bar".to_string(),
            password: "baz".to_string(),
            real_name: Some("Foo Bar".to_string()),
            network_id: network_id.map(str::to_owned),
            name: None,
        }
    }

    pub fn connection(network_id: Option<&str>) -> Connection {
        Connection::new(ConnectionId(1), config(network_id))
    }

    pub fn queue() -> (WriteQueue, mpsc::Receiver<WriteOp>) {
        WriteQueue::new(64)
    }

    /// Lines written so far, without CRLF.
    pub fn drain(rx: &mut mpsc::Receiver<WriteOp>) -> Vec<String> {
        let mut lines = Vec::new();
        while let Ok(op) = rx.try_recv() {
            if let WriteOp::Write(request) = op {
                let text = String::from_utf8_lossy(&request.bytes);
                lines.push(text.trim_end_matches("\r\n").to_string());
            }
        }
        lines
    }
}
