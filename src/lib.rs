//! slirc-client - Straylight IRC client core.
//!
//! Keeps several IRC connections (or one bouncer and the networks behind it)
//! alive at once: a reader task per connection feeds one dispatcher, which
//! owns all session state and hands outbound lines to a single write
//! serializer.
//!
//! ```text
//! readers ──► event queue ──► Dispatcher ──► write queue ──► writer
//!                 ▲                │
//!  ClientHandle ──┘                └── Session (channels, users)
//! ```

pub mod bridge;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod handlers;
pub mod network;
pub mod state;
pub mod telemetry;

pub use bridge::{Bridge, ClientHandle};
pub use config::{Config, ConnectionConfig};
pub use dispatch::Dispatcher;
pub use error::{ClientError, HandlerError};
pub use event::Event;
pub use network::{Connection, ConnectionId, Connector, TcpConnector, WriteQueue};
