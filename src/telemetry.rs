//! Subscriber setup for binaries embedding the client.
//!
//! The library itself only emits `tracing` events; nothing is printed until
//! a subscriber is installed.

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log filter: {0}")]
    InvalidFilter(#[from] ParseError),

    #[error("failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Installs the global `fmt` subscriber.
///
/// `RUST_LOG`, when set and valid, takes precedence over `config.filter`.
/// Fails if a global subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter)?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };

    installed.map_err(|e| TelemetryError::Install(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_an_error() {
        let config = LoggingConfig::default();
        let _ = init(&config);

        assert!(matches!(init(&config), Err(TelemetryError::Install(_))));
    }
}
