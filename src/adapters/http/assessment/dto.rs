use serde::Serialize;

use crate::adapters::http::reports::ConditionView;
use crate::domain::foundation::RecordId;
use crate::domain::questionnaire::QuestionDescriptor;
use crate::domain::report::ResultLocator;

/// Body of `GET /api/questions`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub total: usize,
    pub questions: Vec<QuestionDescriptor>,
}

/// Body of `POST /api/assessments`.
///
/// Conditions use the same view as the report detail endpoint, so a client
/// can render the fresh result without a second request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub record_id: RecordId,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative_summary: Option<String>,
    pub conditions: Vec<ConditionView>,
}

impl From<ResultLocator> for SubmissionResponse {
    fn from(locator: ResultLocator) -> Self {
        let report = &locator.report;
        Self {
            record_id: locator.record_id,
            status: report.status().to_string(),
            narrative_summary: report.narrative_summary().map(str::to_string),
            conditions: report.conditions().iter().map(ConditionView::from).collect(),
        }
    }
}
