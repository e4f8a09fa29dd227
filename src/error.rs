//! Unified error handling for slirc-client.
//!
//! Handler errors stay local to the one message being processed. Client
//! errors mean a queue went away underneath the run loop and end it.

use thiserror::Error;

// ============================================================================
// Handler Errors (per-message processing)
// ============================================================================

/// Errors that can occur while handling one inbound message.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("{command}: not enough parameters (expected {expected})")]
    NeedMoreParams {
        command: &'static str,
        expected: usize,
    },

    #[error("{command}: unexpected parameter {param:?}")]
    UnexpectedParam { command: &'static str, param: String },

    #[error(transparent)]
    Fatal(#[from] ClientError),
}

impl HandlerError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NeedMoreParams { .. } => "need_more_params",
            Self::UnexpectedParam { .. } => "unexpected_param",
            Self::Fatal(_) => "fatal",
        }
    }
}

/// Result type for message handlers.
pub type HandlerResult = Result<(), HandlerError>;

/// Fetch parameter `idx` of `msg` or fail with [`HandlerError::NeedMoreParams`].
pub(crate) fn require<'m>(
    msg: &'m slirc_proto::Message,
    command: &'static str,
    idx: usize,
) -> Result<&'m str, HandlerError> {
    msg.param(idx).ok_or(HandlerError::NeedMoreParams {
        command,
        expected: idx + 1,
    })
}

// ============================================================================
// Client Errors (run-loop fatal)
// ============================================================================

/// Conditions the run loop cannot recover from.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("write queue closed")]
    WriteQueueClosed,

    #[error("event queue closed")]
    EventQueueClosed,
}
