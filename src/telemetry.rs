//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins over the configured filter. Production logs are JSON lines,
//! everything else uses the compact formatter.

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log filter '{value}'")]
    EnvFilter {
        value: String,
        #[source]
        source: ParseError,
    },

    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(String),
}

/// Filter from `RUST_LOG`, falling back to `server.log_level`.
pub fn env_filter(config: &ServerConfig) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|source| {
            TelemetryError::EnvFilter {
                value: config.log_level.clone(),
                source,
            }
        }),
    }
}

pub fn init(config: &ServerConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = if config.is_production() {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };

    result.map_err(|e| TelemetryError::Subscriber(e.to_string()))
}
