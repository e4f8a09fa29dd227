//! `soju.im/bouncer-networks` support.
//!
//! A bouncer announces each backend network as
//! `BOUNCER NETWORK <netid> <attributes>`, where the attributes are a
//! `;`-separated list of `key=value` pairs using message-tag escaping, or
//! the single token `*` once the network has been deleted.
//!
//! # Reference
//! - <https://codeberg.org/emersion/soju/src/branch/master/doc/ext/bouncer-networks.md>

/// Subcommand token that introduces a network update.
pub const NETWORK_SUBCOMMAND: &str = "NETWORK";

/// Attribute blob marking a deleted network.
pub const DELETED_MARKER: &str = "*";

/// Parsed network attributes, in wire order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NetworkAttributes {
    pairs: Vec<(String, String)>,
}

impl NetworkAttributes {
    /// Parse an attribute blob.
    ///
    /// Pairs without `=` and pairs with an empty key are skipped rather than
    /// failing the whole blob.
    pub fn parse(blob: &str) -> Self {
        let pairs = blob
            .split(';')
            .filter_map(|pair| pair.split_once('='))
            .filter(|(key, _)| !key.is_empty())
            .map(|(key, value)| (key.to_owned(), unescape_value(value)))
            .collect();
        Self { pairs }
    }

    /// Value for `key`, last occurrence winning.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The human-readable network name.
    pub fn name(&self) -> Option<&str> {
        self.get("name")
    }

    /// Number of well-formed pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no well-formed pair was found.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// A single `BOUNCER NETWORK` notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NetworkUpdate {
    /// The network was removed on the bouncer.
    Deleted {
        /// Network identifier.
        id: String,
    },
    /// The network exists (new, or its attributes changed).
    Attributes {
        /// Network identifier.
        id: String,
        /// Parsed attribute blob.
        attributes: NetworkAttributes,
    },
}

impl NetworkUpdate {
    /// Interpret the `<netid> <attributes>` pair.
    pub fn new(id: &str, blob: &str) -> Self {
        if blob == DELETED_MARKER {
            Self::Deleted { id: id.to_owned() }
        } else {
            Self::Attributes {
                id: id.to_owned(),
                attributes: NetworkAttributes::parse(blob),
            }
        }
    }

    /// Network identifier this update refers to.
    pub fn id(&self) -> &str {
        match self {
            Self::Deleted { id } | Self::Attributes { id, .. } => id,
        }
    }
}

/// Undo IRCv3 message-tag value escaping.
fn unescape_value(value: &str) -> String {
    let mut unescaped = String::with_capacity(value.len());
    let mut iter = value.chars();
    while let Some(c) = iter.next() {
        let r = if c == '\\' {
            match iter.next() {
                Some(':') => ';',
                Some('s') => ' ',
                Some('\\') => '\\',
                Some('r') => '\r',
                Some('n') => '\n',
                Some(c) => c,
                None => break,
            }
        } else {
            c
        };
        unescaped.push(r);
    }
    unescaped
}
