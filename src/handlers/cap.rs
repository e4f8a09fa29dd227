//! CAP and AUTHENTICATE handlers for the client side of IRCv3 capability
//! negotiation and SASL PLAIN.
//!
//! `Registering → CapabilityAck → Authenticating → AuthComplete`
//!
//! Reference: <https://ircv3.net/specs/extensions/capability-negotiation>

use super::Context;
use crate::error::{HandlerError, HandlerResult, require};
use slirc_proto::caps::{parse_changes, parse_list};
use slirc_proto::{
    AUTHENTICATE_CONTINUE, CapChange, CapSubCommand, Capability, Message, Response, SaslMechanism,
    chunk_response, encode_plain_with_authzid,
};
use tracing::{debug, info, warn};

/// Handshake progress of one connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HandshakeState {
    /// Capability requests and NICK/USER sent, waiting for ACKs.
    #[default]
    Registering,
    /// At least one capability acknowledged.
    CapabilityAck,
    /// `AUTHENTICATE PLAIN` sent, waiting for the server's `+`.
    Authenticating,
    /// Credentials sent and negotiation closed with `CAP END`.
    AuthComplete,
}

/// `CAP <target> <subcommand> [*] :<capabilities>`
pub(super) async fn handle_cap(ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
    let sub_str = require(msg, "CAP", 1)?;
    let sub: CapSubCommand = sub_str.parse().map_err(|_| HandlerError::UnexpectedParam {
        command: "CAP",
        param: sub_str.to_owned(),
    })?;
    // The list is always last; multi-line LS puts a `*` in between.
    let list = require(msg, "CAP", 2).and_then(|_| {
        msg.params.last().map(String::as_str).ok_or(HandlerError::NeedMoreParams {
            command: "CAP",
            expected: 3,
        })
    });

    match sub {
        CapSubCommand::ACK => on_ack(ctx, parse_changes(list?)).await,
        CapSubCommand::NAK => {
            on_nak(ctx, parse_list(list?));
            Ok(())
        }
        CapSubCommand::DEL => {
            for cap in parse_list(list?) {
                ctx.conn.caps.remove(&cap);
            }
            Ok(())
        }
        other => {
            debug!(conn = %ctx.conn.id, subcommand = %other, "Ignoring CAP subcommand");
            Ok(())
        }
    }
}

async fn on_ack(ctx: &mut Context<'_>, changes: Vec<CapChange>) -> HandlerResult {
    let sasl = changes.contains(&CapChange::Enable(Capability::Sasl));
    debug!(conn = %ctx.conn.id, caps = ?changes, "Capabilities acknowledged");
    for change in changes {
        match change {
            CapChange::Enable(cap) => {
                ctx.conn.caps.insert(cap);
            }
            CapChange::Disable(cap) => {
                ctx.conn.caps.remove(&cap);
            }
        }
    }

    if ctx.conn.handshake == HandshakeState::Registering {
        ctx.conn.handshake = HandshakeState::CapabilityAck;
    }

    if sasl && ctx.conn.handshake == HandshakeState::CapabilityAck {
        ctx.send(&Message::authenticate_mechanism(&SaslMechanism::Plain))
            .await?;
        ctx.conn.handshake = HandshakeState::Authenticating;
    }

    Ok(())
}

fn on_nak(ctx: &mut Context<'_>, caps: Vec<Capability>) {
    if caps.contains(&Capability::Sasl) {
        warn!(
            conn = %ctx.conn.id,
            server = %ctx.conn.config.server,
            "Server refused SASL, authentication will not proceed"
        );
    } else {
        debug!(conn = %ctx.conn.id, caps = ?caps, "Capabilities refused");
    }
}

/// `AUTHENTICATE +`
///
/// Sends the PLAIN response, the bouncer bind when configured, then closes
/// negotiation.
pub(super) async fn handle_authenticate(ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
    let data = require(msg, "AUTHENTICATE", 0)?;
    if data != AUTHENTICATE_CONTINUE {
        debug!(conn = %ctx.conn.id, "Ignoring AUTHENTICATE challenge");
        return Ok(());
    }

    let config = &ctx.conn.config;
    let encoded = encode_plain_with_authzid(&config.user, &config.nick, &config.password);
    for chunk in chunk_response(&encoded) {
        ctx.send(&Message::authenticate(chunk)).await?;
    }

    if let Some(network_id) = config.network() {
        ctx.send(&Message::bouncer_bind(network_id)).await?;
    }

    ctx.send(&Message::cap_end()).await?;
    ctx.conn.handshake = HandshakeState::AuthComplete;
    Ok(())
}

pub(super) fn observe_sasl_success(ctx: &Context<'_>, response: Response, msg: &Message) {
    match response {
        Response::RPL_LOGGEDIN => {
            info!(conn = %ctx.conn.id, account = msg.param(2).unwrap_or("*"), "Logged in")
        }
        _ => debug!(conn = %ctx.conn.id, "SASL authentication successful"),
    }
}

pub(super) fn observe_sasl_failure(ctx: &Context<'_>, response: Response, msg: &Message) {
    warn!(
        conn = %ctx.conn.id,
        reply = response.name(),
        text = msg.params.last().map(String::as_str).unwrap_or_default(),
        "SASL authentication failed"
    );
}
