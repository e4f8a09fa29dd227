//! AWAY notifications (away-notify).

use super::Context;
use crate::error::HandlerResult;
use slirc_proto::Message;
use tracing::debug;

/// `:<nick>!<user>@<host> AWAY [:<message>]`
///
/// Any parameter at all, even an empty one, means away; none means back.
pub(super) fn handle_away(ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
    let Some(nick) = msg.source_nick() else {
        debug!(conn = %ctx.conn.id, "AWAY without source, dropping");
        return Ok(());
    };

    let away = !msg.params.is_empty();
    ctx.conn.session.set_away(nick, away);
    debug!(conn = %ctx.conn.id, nick = %nick, away, "Away status changed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::{connection, queue};
    use crate::handlers::{Context, handle};
    use slirc_proto::Message;

    fn parse(line: &str) -> Message {
        line.parse().unwrap()
    }

    fn away_of(conn: &crate::network::Connection, nick: &str) -> Option<bool> {
        conn.session.find_user(nick).map(|u| u.away)
    }

    #[tokio::test]
    async fn test_away_with_message() {
        let (writes, _rx) = queue();
        let mut conn = connection(None);
        let mut ctx = Context::new(&mut conn, &writes);

        handle(&mut ctx, &parse(":alice!host AWAY :lunch")).await.unwrap();

        assert_eq!(away_of(&conn, "alice"), Some(true));
    }

    #[tokio::test]
    async fn test_away_empty_trailing_counts() {
        let (writes, _rx) = queue();
        let mut conn = connection(None);
        let mut ctx = Context::new(&mut conn, &writes);

        handle(&mut ctx, &parse(":alice!host AWAY :")).await.unwrap();

        assert_eq!(away_of(&conn, "alice"), Some(true));
    }

    #[tokio::test]
    async fn test_back() {
        let (writes, _rx) = queue();
        let mut conn = connection(None);
        let mut ctx = Context::new(&mut conn, &writes);

        handle(&mut ctx, &parse(":alice!host AWAY :lunch")).await.unwrap();
        handle(&mut ctx, &parse(":alice!host AWAY")).await.unwrap();

        assert_eq!(away_of(&conn, "alice"), Some(false));
    }

    #[tokio::test]
    async fn test_source_without_bang() {
        let (writes, _rx) = queue();
        let mut conn = connection(None);
        let mut ctx = Context::new(&mut conn, &writes);

        handle(&mut ctx, &parse(":alice AWAY :gone")).await.unwrap();

        assert_eq!(away_of(&conn, "alice"), Some(true));
    }

    #[tokio::test]
    async fn test_no_source_dropped() {
        let (writes, _rx) = queue();
        let mut conn = connection(None);
        let mut ctx = Context::new(&mut conn, &writes);

        handle(&mut ctx, &parse("AWAY :gone")).await.unwrap();

        assert_eq!(conn.session.user_count(), 0);
    }
}
