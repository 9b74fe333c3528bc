//! Shared application state for the HTTP layer.

use std::sync::Arc;

use crate::application::handlers::{
    GetProfileOverviewHandler, GetReportHandler, GetWellnessTrendHandler, ListReportsHandler,
    SubmitAssessmentHandler,
};
use crate::domain::questionnaire::QuestionCatalog;
use crate::ports::{ProfileReader, ReportRepository, ScoringService, SessionValidator};

/// Dependencies shared by every request.
///
/// Cloned per request; everything inside is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<QuestionCatalog>,
    pub scoring: Arc<dyn ScoringService>,
    pub reports: Arc<dyn ReportRepository>,
    pub profiles: Arc<dyn ProfileReader>,
    pub validator: Arc<dyn SessionValidator>,
}

impl AppState {
    pub fn submit_assessment_handler(&self) -> SubmitAssessmentHandler {
        SubmitAssessmentHandler::new(
            self.catalog.clone(),
            self.scoring.clone(),
            self.reports.clone(),
        )
    }

    pub fn get_report_handler(&self) -> GetReportHandler {
        GetReportHandler::new(self.reports.clone())
    }

    pub fn list_reports_handler(&self) -> ListReportsHandler {
        ListReportsHandler::new(self.reports.clone())
    }

    pub fn wellness_trend_handler(&self) -> GetWellnessTrendHandler {
        GetWellnessTrendHandler::new(self.reports.clone())
    }

    pub fn profile_overview_handler(&self) -> GetProfileOverviewHandler {
        GetProfileOverviewHandler::new(self.profiles.clone(), self.reports.clone())
    }
}
