//! Process configuration.
//!
//! Read from the environment exactly once at startup and injected into
//! the router state; nothing re-reads the environment per request.

use std::time::Duration;
use thiserror::Error;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default deadline for a single provider lookup.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_millis(5000);

/// Configuration error
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Provider credential missing from the environment
    #[error("GOOGLE_API_KEY is not set")]
    MissingApiKey,

    /// PORT is present but not a valid port number
    #[error("invalid PORT value: {0}")]
    InvalidPort(String),
}

/// Service configuration
#[derive(Clone)]
pub struct Config {
    /// Safe Browsing API credential. Never logged.
    pub api_key: String,
    /// Listen port.
    pub port: u16,
    /// Deadline for a single provider lookup.
    pub lookup_timeout: Duration,
}

impl Config {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Read configuration from an arbitrary key lookup.
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GOOGLE_API_KEY")
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            api_key,
            port,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
        })
    }
}

// Manual impl so the credential cannot end up in debug logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("port", &self.port)
            .field("lookup_timeout", &self.lookup_timeout)
            .finish()
    }
}
