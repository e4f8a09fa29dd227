//! Channel state replies: RPL_TOPIC (332) and RPL_NAMREPLY (353).

use super::Context;
use crate::error::{HandlerResult, require};
use slirc_proto::Message;
use tracing::debug;

/// Membership prefixes a server may put in front of a nick in 353.
const MEMBERSHIP_PREFIXES: [char; 5] = ['~', '&', '@', '%', '+'];

/// `332 <client> <channel> :<topic>`
pub(super) fn handle_topic(ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
    let topic = require(msg, "RPL_TOPIC", 2)?;
    let channel = require(msg, "RPL_TOPIC", 1)?;

    ctx.conn.session.set_topic(channel, topic);
    debug!(conn = %ctx.conn.id, channel = %channel, "Topic updated");
    Ok(())
}

/// `353 <client> <symbol> <channel> :[prefix]<nick>{ [prefix]<nick>}`
///
/// Repeated replies for one channel accumulate; the member list is re-sorted
/// and deduplicated after each one.
pub(super) fn handle_names(ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
    let nicks = require(msg, "RPL_NAMREPLY", 3)?;
    let channel = require(msg, "RPL_NAMREPLY", 2)?;

    let nicks = nicks
        .split(' ')
        .map(strip_membership)
        .filter(|nick| !nick.is_empty());
    ctx.conn.session.add_members(channel, nicks);

    debug!(
        conn = %ctx.conn.id,
        channel = %channel,
        members = ctx.conn.session.channel(channel).map_or(0, |c| c.members().len()),
        "Names updated"
    );
    Ok(())
}

/// `@+alice!a@host` -> `alice`
fn strip_membership(token: &str) -> &str {
    let nick = token.trim_start_matches(MEMBERSHIP_PREFIXES);
    nick.split_once('!').map_or(nick, |(nick, _)| nick)
}
