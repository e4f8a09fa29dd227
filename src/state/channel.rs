//! Channel records.

use super::UserId;

/// A channel as seen through topic and name-list replies.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Channel {
    name: String,
    topic: Option<String>,
    /// Kept sorted by nick after every batch.
    members: Vec<UserId>,
}

impl Channel {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            topic: None,
            members: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    pub fn set_topic(&mut self, topic: &str) {
        self.topic = Some(topic.to_owned());
    }

    pub fn members(&self) -> &[UserId] {
        &self.members
    }

    pub(crate) fn members_mut(&mut self) -> &mut Vec<UserId> {
        &mut self.members
    }
}
