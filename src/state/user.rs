//! User records.

/// Index of a [`User`] in its session's registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub(crate) usize);

/// Presentation color, an index into a 16-entry palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color(pub u8);

impl Color {
    pub const PALETTE_SIZE: u8 = 16;

    /// Stable color for a nick (djb2 over the bytes).
    pub fn for_nick(nick: &str) -> Self {
        let hash = nick
            .bytes()
            .fold(5381u32, |h, b| h.wrapping_mul(33).wrapping_add(u32::from(b)));
        Self((hash % u32::from(Self::PALETTE_SIZE)) as u8)
    }
}

/// A user seen on a connection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub nick: String,
    pub away: bool,
    pub color: Color,
}

impl User {
    pub fn new(nick: &str) -> Self {
        Self {
            nick: nick.to_owned(),
            away: false,
            color: Color::for_nick(nick),
        }
    }
}
