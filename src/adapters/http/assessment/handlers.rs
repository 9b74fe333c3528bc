use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::dto::{CatalogResponse, SubmissionResponse};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::OptionalAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::SubmitAssessmentCommand;
use crate::domain::questionnaire::AnswerMap;
use crate::ports::FixedIdentity;

/// GET /api/questions - the catalog in presentation order.
pub async fn list_questions(State(state): State<AppState>) -> impl IntoResponse {
    let questions: Vec<_> = state.catalog.iter().cloned().collect();
    Json(CatalogResponse {
        total: questions.len(),
        questions,
    })
}

/// POST /api/assessments - score and store a completed questionnaire.
///
/// The body is the answer map itself, keyed by question id.
///
/// Anonymous requests reach the pipeline, which refuses them before any
/// scoring call is made.
pub async fn submit_assessment(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Json(answers): Json<AnswerMap>,
) -> Result<impl IntoResponse, ApiError> {
    let identity = FixedIdentity::from(user.map(|u| u.id));
    let locator = state
        .submit_assessment_handler()
        .handle(&identity, SubmitAssessmentCommand { answers })
        .await?;

    Ok((StatusCode::CREATED, Json(SubmissionResponse::from(locator))))
}
