//! Scoring service configuration

use secrecy::Secret;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Where the risk model lives and how long to wait for it.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    /// Base URL; requests go to `{base_url}/api/analyze`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer key sent with each request, if the service requires one
    #[serde(default)]
    pub api_key: Option<Secret<String>>,

    /// Transport timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// YAML catalog replacing the built-in questions
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

impl ScoringConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.base_url.is_empty() {
            return Err(ValidationError::MissingRequired("SCORING__BASE_URL"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidScoringUrl);
        }
        if *environment == Environment::Production && !self.base_url.starts_with("https://") {
            return Err(ValidationError::ScoringUrlMustBeHttps);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 600 {
            return Err(ValidationError::InvalidScoringTimeout);
        }
        Ok(())
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout(),
            catalog_path: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout() -> u64 {
    120
}
