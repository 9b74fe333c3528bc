use axum::extract::{Json, Path, Query, State};
use axum::response::IntoResponse;

use super::dto::{ReportDetailResponse, ReportQueryParams, ReportSummaryResponse};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::{GetReportQuery, GetWellnessTrendQuery, ListReportsQuery};
use crate::domain::foundation::RecordId;

/// GET /api/reports - the caller's history, newest first.
pub async fn list_reports(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let records = state
        .list_reports_handler()
        .handle(ListReportsQuery { user_id: user.id })
        .await?;

    let summaries: Vec<ReportSummaryResponse> =
        records.iter().map(ReportSummaryResponse::from).collect();
    Ok(Json(summaries))
}

/// GET /api/reports/:id?condition=Name
pub async fn get_report(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(record_id): Path<RecordId>,
    Query(params): Query<ReportQueryParams>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = state
        .get_report_handler()
        .handle(GetReportQuery {
            record_id,
            user_id: user.id,
            condition: params.condition,
        })
        .await?;

    Ok(Json(ReportDetailResponse::from(detail)))
}

/// GET /api/reports/trend
pub async fn get_wellness_trend(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let trend = state
        .wellness_trend_handler()
        .handle(GetWellnessTrendQuery { user_id: user.id })
        .await?;
    Ok(Json(trend))
}
