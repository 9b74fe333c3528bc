//! Report selection - which condition of a report is being viewed.

use thiserror::Error;

use super::model::{ConditionReport, Report, RiskDirection, RiskFactor};
use crate::domain::foundation::ErrorCode;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("condition '{0}' is not part of this report")]
    NotFound(String),
}

impl SelectionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SelectionError::NotFound(_) => ErrorCode::ConditionNotFound,
        }
    }
}

/// Factors split by direction, each side in its original order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartitionedFactors<'a> {
    pub increased: Vec<&'a RiskFactor>,
    pub reduced: Vec<&'a RiskFactor>,
}

/// Splits a condition's factors into contributing and protective lists.
pub fn partition_factors(condition: &ConditionReport) -> PartitionedFactors<'_> {
    let (increased, reduced) = condition
        .factors
        .iter()
        .partition(|f| f.direction == RiskDirection::Increased);
    PartitionedFactors { increased, reduced }
}

/// View state over one report. The first condition is active initially.
#[derive(Debug, Clone)]
pub struct ReportSelection {
    report: Report,
    active: usize,
}

impl ReportSelection {
    pub fn new(report: Report) -> Self {
        Self { report, active: 0 }
    }

    /// Builds a selection with `condition` active, or the first one if `None`.
    pub fn with_active(report: Report, condition: Option<&str>) -> Result<Self, SelectionError> {
        let mut selection = Self::new(report);
        if let Some(name) = condition {
            selection.select(name)?;
        }
        Ok(selection)
    }

    pub fn select(&mut self, condition: &str) -> Result<&ConditionReport, SelectionError> {
        let index = self
            .report
            .conditions()
            .iter()
            .position(|c| c.condition == condition)
            .ok_or_else(|| SelectionError::NotFound(condition.to_string()))?;
        self.active = index;
        Ok(self.active_condition())
    }

    pub fn active_condition(&self) -> &ConditionReport {
        &self.report.conditions()[self.active]
    }

    pub fn active_condition_id(&self) -> &str {
        &self.active_condition().condition
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn into_report(self) -> Report {
        self.report
    }
}
