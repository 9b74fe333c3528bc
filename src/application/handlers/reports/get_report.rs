//! GetReportHandler - one record, viewed through a condition selection.

use std::sync::Arc;

use super::errors::ReportQueryError;
use crate::domain::foundation::{RecordId, Timestamp, UserId};
use crate::domain::questionnaire::AnswerMap;
use crate::domain::report::ReportSelection;
use crate::ports::ReportRepository;

#[derive(Debug, Clone)]
pub struct GetReportQuery {
    pub record_id: RecordId,
    pub user_id: UserId,
    /// Condition to make active; the first condition when `None`.
    pub condition: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReportDetail {
    pub record_id: RecordId,
    pub created_at: Timestamp,
    pub input_snapshot: AnswerMap,
    pub selection: ReportSelection,
}

pub struct GetReportHandler {
    repository: Arc<dyn ReportRepository>,
}

impl GetReportHandler {
    pub fn new(repository: Arc<dyn ReportRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetReportQuery) -> Result<ReportDetail, ReportQueryError> {
        let record = self
            .repository
            .get_record(&query.record_id)
            .await?
            .ok_or(ReportQueryError::NotFound(query.record_id))?;

        if !record.is_owned_by(&query.user_id) {
            tracing::warn!(
                user_id = %query.user_id,
                record_id = %query.record_id,
                "attempt to read another user's record"
            );
            return Err(ReportQueryError::Forbidden(query.record_id));
        }

        let selection = ReportSelection::with_active(record.report, query.condition.as_deref())?;

        Ok(ReportDetail {
            record_id: record.id,
            created_at: record.created_at,
            input_snapshot: record.input_snapshot,
            selection,
        })
    }
}
