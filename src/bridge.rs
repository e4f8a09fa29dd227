//! The narrow surface exposed to the scripting side.
//!
//! Scripts can ask for a connection and emit log lines; nothing else crosses
//! this boundary.

use crate::config::ConnectionConfig;
use crate::error::ClientError;
use crate::event::Event;
use async_trait::async_trait;
use tokio::sync::mpsc;

#[async_trait]
pub trait Bridge: Send + Sync {
    /// Request a new connection.
    async fn connect(&self, config: ConnectionConfig) -> Result<(), ClientError>;

    /// Emit a log line.
    async fn log(&self, message: String) -> Result<(), ClientError>;
}

/// Cloneable handle that feeds the dispatcher's event queue.
#[derive(Clone, Debug)]
pub struct ClientHandle {
    events: mpsc::Sender<Event>,
}

impl ClientHandle {
    pub fn new(events: mpsc::Sender<Event>) -> Self {
        Self { events }
    }

    async fn push(&self, event: Event) -> Result<(), ClientError> {
        self.events
            .send(event)
            .await
            .map_err(|_| ClientError::EventQueueClosed)
    }

    /// Ask the dispatcher to destroy every connection and stop.
    pub async fn shutdown(&self) -> Result<(), ClientError> {
        self.push(Event::Shutdown).await
    }
}

#[async_trait]
impl Bridge for ClientHandle {
    async fn connect(&self, config: ConnectionConfig) -> Result<(), ClientError> {
        self.push(Event::Connect(config)).await
    }

    async fn log(&self, message: String) -> Result<(), ClientError> {
        self.push(Event::Log(message)).await
    }
}
