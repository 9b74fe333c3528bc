//! Errors shared by the report query handlers.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, RecordId};
use crate::domain::report::SelectionError;

#[derive(Debug, Clone, Error)]
pub enum ReportQueryError {
    #[error("record {0} not found")]
    NotFound(RecordId),

    #[error("record {0} belongs to another user")]
    Forbidden(RecordId),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Repository(#[from] DomainError),
}

impl ReportQueryError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ReportQueryError::NotFound(_) => ErrorCode::RecordNotFound,
            ReportQueryError::Forbidden(_) => ErrorCode::Forbidden,
            ReportQueryError::Selection(err) => err.code(),
            ReportQueryError::Repository(err) => err.code,
        }
    }
}
