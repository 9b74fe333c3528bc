//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `SYMPTOSCORE` prefix and
//! nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use symptoscore::config::AppConfig;
//!
//! # fn main() -> Result<(), symptoscore::config::ConfigError> {
//! let config = AppConfig::load()?;
//! config.validate()?;
//! # Ok(())
//! # }
//! ```

mod auth;
mod database;
mod error;
mod scoring;
mod server;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use scoring::ScoringConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL; records are kept in memory when absent
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// External risk model
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Bearer token validation
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SYMPTOSCORE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// - `SYMPTOSCORE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `SYMPTOSCORE__SCORING__BASE_URL=...` -> `scoring.base_url = ...`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SYMPTOSCORE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.scoring.validate(&self.server.environment)?;
        self.auth.validate(&self.server.environment)?;
        if self.server.request_timeout_secs <= self.scoring.timeout_secs {
            return Err(ValidationError::RequestTimeoutBelowScoring);
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
