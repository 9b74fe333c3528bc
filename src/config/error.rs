//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid socket address: {0}")]
    InvalidSocketAddr(String),

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("Scoring service URL must start with http:// or https://")]
    InvalidScoringUrl,

    #[error("Scoring service URL must use HTTPS in production")]
    ScoringUrlMustBeHttps,

    #[error("Scoring timeout must be between 1 and 600 seconds")]
    InvalidScoringTimeout,

    #[error("Server request timeout must be longer than the scoring timeout")]
    RequestTimeoutBelowScoring,

    #[error("JWT secret must be at least 32 bytes in production")]
    WeakJwtSecret,
}
