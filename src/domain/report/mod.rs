//! Report module - scoring results, condition selection, and wellness trend.
//!
//! # Components
//!
//! - `Report` / `ConditionReport` / `RiskFactor` - the scoring service output
//! - `RiskBand::classify` - the one Low/Moderate/High threshold table
//! - `ReportSelection` - active condition tracking and factor partitioning
//! - `PersistedRecord` / `ResultLocator` - what the store keeps and hands back
//! - `trend` / `wellness_score` - longitudinal aggregation

mod band;
mod model;
mod record;
mod selection;
mod trend;

pub use band::{RiskBand, HIGH_THRESHOLD, MODERATE_THRESHOLD};
pub use model::{ConditionReport, Report, ReportError, RiskDirection, RiskFactor};
pub use record::{NewRecord, PersistedRecord, RecordOrder, ResultLocator};
pub use selection::{partition_factors, PartitionedFactors, ReportSelection, SelectionError};
pub use trend::{
    trend, wellness_score, TrendError, TrendPoint, TrendSummary, WellnessTrend, MIN_TREND_RECORDS,
};

#[cfg(test)]
pub(crate) use model::test_support;
