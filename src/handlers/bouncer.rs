//! `soju.im/bouncer-networks`: one connection per bouncer network.
//!
//! A `BOUNCER NETWORK <id> <attributes>` line either announces a network
//! (spawn a connection bound to it unless one already exists) or reports it
//! deleted with `*` (destroy the connection holding it).

use crate::config::ConnectionConfig;
use crate::error::{HandlerError, require};
use crate::network::ConnectionId;
use slirc_proto::bouncer::NETWORK_SUBCOMMAND;
use slirc_proto::{Message, NetworkUpdate};

/// A connection currently holding a network id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Holder {
    /// Established and registered in the active set.
    Active(ConnectionId),
    /// Connect task still running.
    Pending(ConnectionId),
}

/// What the dispatcher should do about one network update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BouncerAction {
    /// Open a connection with this derived configuration.
    Spawn(ConnectionConfig),
    /// Destroy the holder of a deleted network.
    Destroy(Holder),
    /// Nothing to do.
    Ignore,
}

/// Extract the `NETWORK <id> <attributes>` triple, wherever `NETWORK`
/// appears in the parameters. Other subcommands yield `None`.
pub fn network_update(msg: &Message) -> Result<Option<NetworkUpdate>, HandlerError> {
    let Some(pos) = msg.params.iter().position(|p| p == NETWORK_SUBCOMMAND) else {
        return Ok(None);
    };

    let id = require(msg, "BOUNCER", pos + 1)?;
    let blob = require(msg, "BOUNCER", pos + 2)?;
    Ok(Some(NetworkUpdate::new(id, blob)))
}

/// Decide how to apply `update`, given who (if anyone) holds its id and
/// the configuration of the connection the update arrived on.
pub fn plan(update: NetworkUpdate, holder: Option<Holder>, base: &ConnectionConfig) -> BouncerAction {
    match (update, holder) {
        (NetworkUpdate::Deleted { .. }, Some(holder)) => BouncerAction::Destroy(holder),
        (NetworkUpdate::Deleted { .. }, None) => BouncerAction::Ignore,
        (NetworkUpdate::Attributes { .. }, Some(_)) => BouncerAction::Ignore,
        (NetworkUpdate::Attributes { id, attributes }, None) => {
            BouncerAction::Spawn(base.for_network(&id, attributes.name()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::config;

    fn parse(line: &str) -> Message {
        line.parse().unwrap()
    }

    #[test]
    fn test_network_update_found_anywhere() {
        let update = network_update(&parse("BOUNCER NETWORK net1 name=Example;"))
            .unwrap()
            .unwrap();
        assert_eq!(update.id(), "net1");

        let shifted = network_update(&parse(":bnc BOUNCER bar NETWORK net2 *"))
            .unwrap()
            .unwrap();
        assert_eq!(
            shifted,
            NetworkUpdate::Deleted {
                id: "net2".to_string()
            }
        );
    }

    #[test]
    fn test_other_subcommands_ignored() {
        assert!(network_update(&parse("BOUNCER BIND 42")).unwrap().is_none());
        assert!(network_update(&parse("BOUNCER")).unwrap().is_none());
    }

    #[test]
    fn test_truncated_network_line() {
        let err = network_update(&parse("BOUNCER NETWORK net1")).unwrap_err();
        assert!(matches!(
            err,
            HandlerError::NeedMoreParams {
                command: "BOUNCER",
                expected: 3
            }
        ));
    }

    #[test]
    fn test_plan_spawn_named() {
        let base = config(None);
        let update = NetworkUpdate::new("net1", "name=Example;");

        match plan(update, None, &base) {
            BouncerAction::Spawn(derived) => {
                assert_eq!(derived.network_id.as_deref(), Some("net1"));
                assert_eq!(derived.name.as_deref(), Some("Example"));
                assert_eq!(derived.server, base.server);
                assert_eq!(derived.password, base.password);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_plan_spawn_unnamed() {
        let update = NetworkUpdate::new("net1", "host=irc.libera.chat");
        match plan(update, None, &config(None)) {
            BouncerAction::Spawn(derived) => assert_eq!(derived.name, None),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_plan_already_tracked() {
        let update = NetworkUpdate::new("net1", "name=Example");
        let holder = Some(Holder::Active(ConnectionId(3)));
        assert_eq!(plan(update, holder, &config(None)), BouncerAction::Ignore);
    }

    #[test]
    fn test_plan_delete() {
        let holder = Holder::Pending(ConnectionId(4));
        assert_eq!(
            plan(NetworkUpdate::new("net1", "*"), Some(holder), &config(None)),
            BouncerAction::Destroy(holder)
        );
        assert_eq!(
            plan(NetworkUpdate::new("net1", "*"), None, &config(None)),
            BouncerAction::Ignore
        );
    }
}
