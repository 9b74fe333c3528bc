//! Scoring Service Port - the external risk model.
//!
//! Request is the canonically ordered answer payload; response is a complete
//! `Report`. A non-success status or an unusable body is a hard failure.
//! There is no streaming or partial result.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::ErrorCode;
use crate::domain::questionnaire::CanonicalPayload;
use crate::domain::report::Report;

#[async_trait]
pub trait ScoringService: Send + Sync {
    /// Scores one complete questionnaire.
    async fn score(&self, payload: &CanonicalPayload) -> Result<Report, ScoringError>;
}

/// Scoring failures. Never retried by the core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    /// Service answered with a non-2xx status.
    #[error("scoring service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Body could not be parsed or violates the report contract.
    #[error("malformed scoring response: {0}")]
    Malformed(String),

    /// Service processed the request but reported a failure.
    #[error("scoring service rejected the request: {0}")]
    Rejected(String),

    /// Connection-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// Transport timeout.
    #[error("scoring request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

impl ScoringError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::ScoringServiceError
    }
}
