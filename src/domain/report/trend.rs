//! Trend aggregator - wellness score per record and the change over time.
//!
//! Pure functions over already-persisted records; safe to recompute freely.

use serde::Serialize;
use thiserror::Error;

use super::model::Report;
use super::record::PersistedRecord;
use crate::domain::foundation::{ErrorCode, RecordId, Timestamp};

/// Minimum number of scorable records for a trend.
pub const MIN_TREND_RECORDS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrendError {
    #[error("report has no conditions to score")]
    InsufficientData,
}

impl TrendError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::InsufficientData
    }
}

/// `round(100 - mean risk)` across the report's conditions.
pub fn wellness_score(report: &Report) -> Result<i64, TrendError> {
    let mean = report.mean_risk().ok_or(TrendError::InsufficientData)?;
    Ok((100.0 - mean).round() as i64)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub record_id: RecordId,
    pub timestamp: Timestamp,
    pub score: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSummary {
    pub series: Vec<TrendPoint>,
    /// Latest score minus earliest score.
    pub delta: i64,
    pub improving: bool,
}

/// Trend result; too little history is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WellnessTrend {
    InsufficientHistory { available: usize },
    Computed(TrendSummary),
}

impl WellnessTrend {
    pub fn summary(&self) -> Option<&TrendSummary> {
        match self {
            WellnessTrend::Computed(summary) => Some(summary),
            WellnessTrend::InsufficientHistory { .. } => None,
        }
    }
}

/// Builds the trend over `records`, which must be ordered oldest first.
///
/// Records whose report cannot be scored are left out of the series.
pub fn trend(records: &[PersistedRecord]) -> WellnessTrend {
    let series: Vec<TrendPoint> = records
        .iter()
        .filter_map(|record| {
            wellness_score(&record.report).ok().map(|score| TrendPoint {
                record_id: record.id,
                timestamp: record.created_at,
                score,
            })
        })
        .collect();

    match (series.first(), series.last()) {
        (Some(first), Some(last)) if series.len() >= MIN_TREND_RECORDS => {
            let delta = last.score - first.score;
            WellnessTrend::Computed(TrendSummary {
                delta,
                improving: delta >= 0,
                series,
            })
        }
        _ => WellnessTrend::InsufficientHistory {
            available: series.len(),
        },
    }
}
