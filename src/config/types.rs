//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::defaults::{default_event_queue, default_true, default_write_queue};
use super::validation::ValidationError;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Queue sizing.
    #[serde(default)]
    pub queues: QueueConfig,
    /// Networks to connect to at startup.
    #[serde(default, rename = "network")]
    pub networks: Vec<ConnectionConfig>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load and validate, folding validation failures into [`ConfigError::Invalid`].
    pub fn load_validated<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Self::load(path)?;
        super::validate(&config).map_err(ConfigError::Invalid)?;
        Ok(config)
    }
}

/// Bounded queue capacities.
#[derive(Debug, Clone, Deserialize)]
pub struct QueueConfig {
    /// Inbound event queue (reader tasks -> dispatcher).
    #[serde(default = "default_event_queue")]
    pub events: usize,
    /// Outbound write queue (dispatcher -> write serializer).
    #[serde(default = "default_write_queue")]
    pub writes: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            events: default_event_queue(),
            writes: default_write_queue(),
        }
    }
}

/// Per-connection configuration.
///
/// Immutable once a connection exists. Bouncer-spawned connections get a
/// derived copy through [`ConnectionConfig::for_network`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConnectionConfig {
    /// `host:port` to connect to.
    pub server: String,
    /// Wrap the TCP stream in TLS.
    #[serde(default = "default_true")]
    pub tls: bool,
    /// Username, also the SASL authorization identity.
    pub user: String,
    /// Nickname, also the SASL authentication identity.
    pub nick: String,
    /// SASL password.
    #[serde(default)]
    pub password: String,
    /// Real name sent in `USER`; falls back to the nick.
    #[serde(default)]
    pub real_name: Option<String>,
    /// Bouncer network to bind to after authentication.
    #[serde(default)]
    pub network_id: Option<String>,
    /// Display name reported by the bouncer.
    #[serde(default)]
    pub name: Option<String>,
}

impl ConnectionConfig {
    /// Real name for `USER`.
    pub fn real_name(&self) -> &str {
        self.real_name.as_deref().unwrap_or(&self.nick)
    }

    /// Host part of `server`, without brackets around IPv6 literals.
    pub fn host(&self) -> &str {
        let host = self
            .server
            .rsplit_once(':')
            .map_or(self.server.as_str(), |(host, _)| host);
        host.trim_start_matches('[').trim_end_matches(']')
    }

    /// Non-empty network id, if any.
    pub fn network(&self) -> Option<&str> {
        self.network_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Copy of this configuration bound to a bouncer network.
    pub fn for_network(&self, network_id: &str, name: Option<&str>) -> Self {
        Self {
            network_id: Some(network_id.to_owned()),
            name: name.map(str::to_owned),
            ..self.clone()
        }
    }
}
