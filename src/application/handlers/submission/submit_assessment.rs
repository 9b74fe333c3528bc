//! SubmitAssessmentHandler - the submission pipeline.
//!
//! Strictly sequential, each step runs only if the previous one succeeded:
//!
//! 1. Resolve identity (fails fast, before any network call)
//! 2. Replay the answers through the flow engine and canonicalize them
//! 3. Score the canonical payload
//! 4. Persist answers + report as one record
//! 5. Return a `ResultLocator`
//!
//! Nothing is retried. A persistence failure after scoring discards the report.

use std::sync::Arc;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::questionnaire::{
    AnswerMap, CanonicalPayload, FlowError, FlowSession, IncompleteAnswers, QuestionCatalog,
};
use crate::domain::report::{NewRecord, ResultLocator};
use crate::ports::{IdentityResolver, ReportRepository, ScoringError, ScoringService};

/// Command carrying a completed answer map.
#[derive(Debug, Clone)]
pub struct SubmitAssessmentCommand {
    pub answers: AnswerMap,
}

/// Pipeline failures, surfaced to the caller with enough detail to display.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmissionError {
    #[error("you must sign in to submit an assessment")]
    Unauthenticated,

    #[error(transparent)]
    Invalid(#[from] FlowError),

    #[error(transparent)]
    Incomplete(#[from] IncompleteAnswers),

    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error("failed to save the assessment: {0}")]
    Persistence(String),
}

impl SubmissionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SubmissionError::Unauthenticated => ErrorCode::Unauthenticated,
            SubmissionError::Invalid(err) => err.code(),
            SubmissionError::Incomplete(_) => ErrorCode::IncompleteAnswers,
            SubmissionError::Scoring(err) => err.code(),
            SubmissionError::Persistence(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<DomainError> for SubmissionError {
    fn from(err: DomainError) -> Self {
        SubmissionError::Persistence(err.message)
    }
}

/// Handler running the submission pipeline.
pub struct SubmitAssessmentHandler {
    catalog: Arc<QuestionCatalog>,
    scoring: Arc<dyn ScoringService>,
    repository: Arc<dyn ReportRepository>,
}

impl SubmitAssessmentHandler {
    pub fn new(
        catalog: Arc<QuestionCatalog>,
        scoring: Arc<dyn ScoringService>,
        repository: Arc<dyn ReportRepository>,
    ) -> Self {
        Self {
            catalog,
            scoring,
            repository,
        }
    }

    pub async fn handle(
        &self,
        identity: &dyn IdentityResolver,
        cmd: SubmitAssessmentCommand,
    ) -> Result<ResultLocator, SubmissionError> {
        // 1. Identity
        let owner = match identity.current_user_id().await {
            Some(user_id) => user_id,
            None => {
                tracing::warn!("assessment submitted without an active session");
                return Err(SubmissionError::Unauthenticated);
            }
        };

        // 2. Validate and canonicalize
        let validated = FlowSession::replay(self.catalog.clone(), &cmd.answers)
            .map_err(|err| {
                tracing::warn!(user_id = %owner, error = %err, "assessment answers rejected");
                err
            })?
            .into_answers();
        let payload = CanonicalPayload::from_answers(&self.catalog, &validated)?;
        let fingerprint = match payload.fingerprint() {
            Ok(fp) => Some(fp),
            Err(err) => {
                tracing::warn!(user_id = %owner, error = %err, "failed to fingerprint payload, storing without one");
                None
            }
        };

        // 3. Score
        let report = self.scoring.score(&payload).await.map_err(|err| {
            tracing::error!(user_id = %owner, error = %err, "scoring service call failed");
            err
        })?;
        tracing::info!(
            user_id = %owner,
            conditions = report.conditions().len(),
            "assessment scored"
        );

        // 4. Persist
        let mut record = NewRecord::new(owner.clone(), cmd.answers, report.clone());
        if let Some(fp) = fingerprint {
            record = record.with_fingerprint(fp);
        }
        let record_id = self.repository.insert_record(record).await.map_err(|err| {
            tracing::error!(user_id = %owner, error = %err, "failed to persist assessment, report discarded");
            err
        })?;
        tracing::info!(user_id = %owner, record_id = %record_id, "assessment saved");

        // 5. Locator
        Ok(ResultLocator { record_id, report })
    }
}
