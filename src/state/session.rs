//! User registry and channel map for one connection.
//!
//! Users live in an arena owned by the session; channels refer to them by
//! [`UserId`]. A user is created the first time any reply mentions its nick
//! and is shared by every channel that lists it.

use super::{Channel, User, UserId};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct Session {
    users: Vec<User>,
    by_nick: HashMap<String, UserId>,
    channels: HashMap<String, Channel>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `nick`, creating the user on first sight.
    pub fn resolve_user(&mut self, nick: &str) -> UserId {
        if let Some(id) = self.by_nick.get(nick) {
            return *id;
        }
        let id = UserId(self.users.len());
        self.users.push(User::new(nick));
        self.by_nick.insert(nick.to_owned(), id);
        id
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.get(id.0)
    }

    pub fn find_user(&self, nick: &str) -> Option<&User> {
        self.by_nick.get(nick).and_then(|id| self.user(*id))
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Resolve `name`, creating an empty channel on first sight.
    pub fn resolve_channel(&mut self, name: &str) -> &mut Channel {
        self.channels
            .entry(name.to_owned())
            .or_insert_with(|| Channel::new(name))
    }

    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.channels.get(name)
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn set_topic(&mut self, channel: &str, topic: &str) {
        self.resolve_channel(channel).set_topic(topic);
    }

    pub fn set_away(&mut self, nick: &str, away: bool) {
        let id = self.resolve_user(nick);
        self.users[id.0].away = away;
    }

    /// Append a batch of nicks to `channel`, then re-sort by nick
    /// (case-sensitive byte order) and drop repeated entries.
    pub fn add_members<'a, I>(&mut self, channel: &str, nicks: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let ids: Vec<UserId> = nicks.into_iter().map(|n| self.resolve_user(n)).collect();

        let users = &self.users;
        let members = self
            .channels
            .entry(channel.to_owned())
            .or_insert_with(|| Channel::new(channel))
            .members_mut();

        members.extend(ids);
        members.sort_by(|a, b| users[a.0].nick.cmp(&users[b.0].nick));
        members.dedup();
    }

    /// Member nicks of `channel` in stored order.
    pub fn member_nicks(&self, channel: &str) -> Vec<&str> {
        self.channel(channel)
            .map(|chan| {
                chan.members()
                    .iter()
                    .filter_map(|id| self.user(*id))
                    .map(|user| user.nick.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }
}
