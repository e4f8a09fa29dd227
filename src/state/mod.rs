//! Per-connection session state.
//!
//! Everything here is owned by one connection and mutated only by the
//! dispatcher, so none of it needs locking.

mod channel;
mod session;
mod user;

pub use channel::Channel;
pub use session::Session;
pub use user::{Color, User, UserId};
