//! Connection registration: the opening burst, registration numerics and
//! keepalive.

use super::Context;
use crate::error::{ClientError, HandlerResult, require};
use crate::network::{Connection, WriteQueue};
use slirc_proto::caps::CLIENT_CAPABILITIES;
use slirc_proto::{Capability, Message, Response};
use tracing::{debug, info};

/// Send capability requests, `NICK` and `USER` for a fresh connection.
///
/// Each capability is requested on its own line so one refusal cannot
/// sink the others.
pub async fn send_registration(writes: &WriteQueue, conn: &Connection) -> Result<(), ClientError> {
    for cap in &CLIENT_CAPABILITIES {
        writes.send(conn.id, &Message::cap_req(cap)).await?;
    }
    writes.send(conn.id, &Message::nick(&conn.config.nick)).await?;
    writes
        .send(
            conn.id,
            &Message::user(&conn.config.user, conn.config.real_name()),
        )
        .await
}

/// 001: registration finished.
///
/// A connection to a bouncer that is not bound to a network asks for the
/// network list, which comes back as `BOUNCER NETWORK` lines.
pub(super) async fn handle_welcome(ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
    info!(
        conn = %ctx.conn.id,
        server = msg.prefix.as_deref().unwrap_or(&ctx.conn.config.server),
        network = ?ctx.conn.config.name,
        "Registered"
    );

    if ctx.conn.network_id().is_none() && ctx.conn.has_cap(&Capability::BouncerNetworks) {
        ctx.send(&Message::bouncer_listnetworks()).await?;
    }
    Ok(())
}

/// 002-005 carry nothing the client acts on yet.
pub(super) fn observe(ctx: &Context<'_>, response: Response, msg: &Message) {
    debug!(
        conn = %ctx.conn.id,
        reply = response.name(),
        params = msg.params.len(),
        "Registration reply"
    );
}

/// `PING <token>`
pub(super) async fn handle_ping(ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
    let token = require(msg, "PING", 0)?;
    ctx.send(&Message::pong(token)).await
}
