//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config struct definitions (Config, QueueConfig, ConnectionConfig)
//! - [`validation`]: Startup checks returning every problem at once

mod defaults;
mod types;
mod validation;

pub use types::{Config, ConfigError, ConnectionConfig, QueueConfig};
pub use validation::{ValidationError, validate};
