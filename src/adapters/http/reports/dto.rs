//! Response shapes for report endpoints.
//!
//! Bands are always re-derived from the risk percentage; the label the
//! scoring service sent is passed through separately as `reportedBand`.

use serde::{Deserialize, Serialize};

use crate::application::handlers::ReportDetail;
use crate::domain::foundation::{RecordId, Timestamp};
use crate::domain::questionnaire::AnswerMap;
use crate::domain::report::{
    partition_factors, wellness_score, ConditionReport, PersistedRecord, RiskFactor,
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportQueryParams {
    pub condition: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorView {
    pub factor: String,
    pub delta: f64,
}

impl From<&RiskFactor> for FactorView {
    fn from(f: &RiskFactor) -> Self {
        Self {
            factor: f.factor.clone(),
            delta: f.delta,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionView {
    pub condition: String,
    pub display_name: String,
    pub risk_percent: f64,
    pub band: String,
    pub reported_band: String,
    pub recommendation: String,
    pub increased: Vec<FactorView>,
    pub reduced: Vec<FactorView>,
}

impl From<&ConditionReport> for ConditionView {
    fn from(c: &ConditionReport) -> Self {
        let factors = partition_factors(c);
        Self {
            condition: c.condition.clone(),
            display_name: c.display_name(),
            risk_percent: c.risk_percent.value(),
            band: c.band().label().to_string(),
            reported_band: c.risk_band.clone(),
            recommendation: c.recommendation.clone(),
            increased: factors.increased.into_iter().map(FactorView::from).collect(),
            reduced: factors.reduced.into_iter().map(FactorView::from).collect(),
        }
    }
}

/// One entry of `GET /api/reports`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummaryResponse {
    pub record_id: RecordId,
    pub created_at: Timestamp,
    pub condition_count: usize,
    pub wellness_score: Option<i64>,
    pub highest_risk: Option<ConditionView>,
}

impl From<&PersistedRecord> for ReportSummaryResponse {
    fn from(record: &PersistedRecord) -> Self {
        let conditions = record.report.conditions();
        let highest = conditions
            .iter()
            .max_by(|a, b| a.risk_percent.value().total_cmp(&b.risk_percent.value()));
        Self {
            record_id: record.id,
            created_at: record.created_at,
            condition_count: conditions.len(),
            wellness_score: wellness_score(&record.report).ok(),
            highest_risk: highest.map(ConditionView::from),
        }
    }
}

/// Body of `GET /api/reports/:id`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDetailResponse {
    pub record_id: RecordId,
    pub created_at: Timestamp,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative_summary: Option<String>,
    pub active_condition: String,
    pub active: ConditionView,
    pub conditions: Vec<ConditionView>,
    pub answers: AnswerMap,
}

impl From<ReportDetail> for ReportDetailResponse {
    fn from(detail: ReportDetail) -> Self {
        let selection = &detail.selection;
        let report = selection.report();
        Self {
            record_id: detail.record_id,
            created_at: detail.created_at,
            status: report.status().to_string(),
            narrative_summary: report.narrative_summary().map(str::to_string),
            active_condition: selection.active_condition_id().to_string(),
            active: ConditionView::from(selection.active_condition()),
            conditions: report.conditions().iter().map(ConditionView::from).collect(),
            answers: detail.input_snapshot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::RiskPercent;

    #[test]
    fn condition_view_uses_derived_band_and_splits_factors() {
        let condition = ConditionReport::new(
            "HeartDisease",
            RiskPercent::try_new(55.0).unwrap(),
            "See a cardiologist",
        )
        .with_reported_band("Moderate")
        .with_factors(vec![
            RiskFactor::increased("Smoking", 12.0).unwrap(),
            RiskFactor::reduced("Exercise", 4.0).unwrap(),
        ]);

        let view = ConditionView::from(&condition);
        assert_eq!(view.display_name, "Heart Disease");
        assert_eq!(view.band, "High");
        assert_eq!(view.reported_band, "Moderate");
        assert_eq!(view.increased.len(), 1);
        assert_eq!(view.reduced[0].factor, "Exercise");
    }
}
