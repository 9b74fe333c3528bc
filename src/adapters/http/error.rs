//! HTTP error mapping.
//!
//! Every failure leaves the API as `{ "code", "message", "details"? }` with a
//! status derived from its `ErrorCode`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::handlers::{ReportQueryError, SubmissionError};
use crate::domain::foundation::{DomainError, ErrorCode};

/// Standard error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Status code for each error category.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::IncompleteAnswers
        | ErrorCode::FlowCompleted
        | ErrorCode::QuestionNotFound => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthenticated => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::RecordNotFound | ErrorCode::ConditionNotFound => StatusCode::NOT_FOUND,
        ErrorCode::InsufficientData => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::ScoringServiceError => StatusCode::BAD_GATEWAY,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// API error type that converts application errors to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    Submission(SubmissionError),
    Query(ReportQueryError),
    Domain(DomainError),
    BadRequest(String),
}

impl From<SubmissionError> for ApiError {
    fn from(err: SubmissionError) -> Self {
        ApiError::Submission(err)
    }
}

impl From<ReportQueryError> for ApiError {
    fn from(err: ReportQueryError) -> Self {
        ApiError::Query(err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

impl ApiError {
    fn to_body(&self) -> (ErrorCode, ErrorResponse) {
        match self {
            ApiError::Submission(err) => {
                let code = err.code();
                let body = ErrorResponse::new(code.to_string(), err.message());
                let body = match err {
                    SubmissionError::Incomplete(inc) => body.with_details(serde_json::json!({
                        "missing": inc.missing,
                        "unexpected": inc.unexpected,
                    })),
                    SubmissionError::Invalid(flow) => match flow {
                        crate::domain::questionnaire::FlowError::Validation(v) => {
                            body.with_details(serde_json::json!({ "field": v.field() }))
                        }
                        _ => body,
                    },
                    _ => body,
                };
                (code, body)
            }
            ApiError::Query(err) => {
                let code = err.code();
                (code, ErrorResponse::new(code.to_string(), err.to_string()))
            }
            ApiError::Domain(err) => {
                let body = ErrorResponse::new(err.code.to_string(), err.message.clone());
                (err.code, body)
            }
            ApiError::BadRequest(message) => (
                ErrorCode::ValidationFailed,
                ErrorResponse::new(ErrorCode::ValidationFailed.to_string(), message.clone()),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (code, mut body) = self.to_body();
        let status = status_for(code);

        if status.is_server_error() {
            tracing::error!(code = %code, message = %body.message, "request failed");
            // Infrastructure detail stays in the logs.
            if matches!(code, ErrorCode::DatabaseError | ErrorCode::InternalError) {
                body = ErrorResponse::new(code.to_string(), "An internal error occurred");
            }
        }

        (status, Json(body)).into_response()
    }
}
