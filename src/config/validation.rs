//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("no [[network]] configured")]
    NoNetworks,
    #[error("network[{0}].server is required")]
    MissingServer(usize),
    #[error("network[{0}].server must be host:port, got '{1}'")]
    InvalidServer(usize, String),
    #[error("network[{0}].user is required")]
    MissingUser(usize),
    #[error("network[{0}].nick is required")]
    MissingNick(usize),
    #[error("queues.{0} must be greater than zero")]
    ZeroQueue(&'static str),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.queues.events == 0 {
        errors.push(ValidationError::ZeroQueue("events"));
    }
    if config.queues.writes == 0 {
        errors.push(ValidationError::ZeroQueue("writes"));
    }

    if config.networks.is_empty() {
        errors.push(ValidationError::NoNetworks);
    }

    for (idx, net) in config.networks.iter().enumerate() {
        if net.server.is_empty() {
            errors.push(ValidationError::MissingServer(idx));
        } else if !has_port(&net.server) {
            errors.push(ValidationError::InvalidServer(idx, net.server.clone()));
        }
        if net.user.is_empty() {
            errors.push(ValidationError::MissingUser(idx));
        }
        if net.nick.is_empty() {
            errors.push(ValidationError::MissingNick(idx));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn has_port(server: &str) -> bool {
    server
        .rsplit_once(':')
        .is_some_and(|(host, port)| !host.is_empty() && port.parse::<u16>().is_ok())
}
