//! Multi-condition risk report as produced by the scoring service.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use super::band::RiskBand;
use crate::domain::foundation::{RiskPercent, ValidationError};

/// Whether a factor pushed risk up or down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskDirection {
    Increased,
    Reduced,
}

/// One answer's contribution to a condition's risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub factor: String,
    /// Magnitude of the contribution in percentage points, never negative.
    pub delta: f64,
    pub direction: RiskDirection,
}

impl RiskFactor {
    pub fn new(
        factor: impl Into<String>,
        delta: f64,
        direction: RiskDirection,
    ) -> Result<Self, ValidationError> {
        let factor = factor.into();
        if factor.trim().is_empty() {
            return Err(ValidationError::empty_field("factor"));
        }
        if !delta.is_finite() || delta < 0.0 {
            return Err(ValidationError::invalid_format(
                "delta",
                format!("must be a non-negative number, got {}", delta),
            ));
        }
        Ok(Self {
            factor,
            delta,
            direction,
        })
    }

    pub fn increased(factor: impl Into<String>, delta: f64) -> Result<Self, ValidationError> {
        Self::new(factor, delta, RiskDirection::Increased)
    }

    pub fn reduced(factor: impl Into<String>, delta: f64) -> Result<Self, ValidationError> {
        Self::new(factor, delta, RiskDirection::Reduced)
    }
}

/// Risk assessment for a single condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionReport {
    pub condition: String,
    pub risk_percent: RiskPercent,
    /// Band label exactly as the scoring service reported it.
    pub risk_band: String,
    pub recommendation: String,
    #[serde(default)]
    pub factors: Vec<RiskFactor>,
}

impl ConditionReport {
    pub fn new(
        condition: impl Into<String>,
        risk_percent: RiskPercent,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            condition: condition.into(),
            risk_percent,
            risk_band: RiskBand::classify(risk_percent.value()).to_string(),
            recommendation: recommendation.into(),
            factors: Vec::new(),
        }
    }

    pub fn with_factors(mut self, factors: Vec<RiskFactor>) -> Self {
        self.factors = factors;
        self
    }

    pub fn with_reported_band(mut self, band: impl Into<String>) -> Self {
        self.risk_band = band.into();
        self
    }

    /// Band derived from `risk_percent`; the authoritative classification.
    pub fn band(&self) -> RiskBand {
        RiskBand::classify(self.risk_percent.value())
    }

    /// Human-readable name: `HeartDisease` becomes `Heart Disease`.
    ///
    /// Runs of capitals stay together (`COPDRisk` becomes `COPD Risk`).
    pub fn display_name(&self) -> String {
        let chars: Vec<char> = self.condition.chars().collect();
        let mut out = String::with_capacity(chars.len() + 4);

        for (i, &c) in chars.iter().enumerate() {
            if i > 0 && c.is_uppercase() {
                let prev = chars[i - 1];
                let next_is_lower = chars.get(i + 1).map_or(false, |n| n.is_lowercase());
                if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                    out.push(' ');
                }
            }
            out.push(c);
        }
        out
    }
}

/// Report construction failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("a report must contain at least one condition")]
    NoConditions,

    #[error("condition '{0}' appears more than once")]
    DuplicateCondition(String),
}

#[derive(Deserialize)]
struct RawReport {
    conditions: Vec<ConditionReport>,
    status: String,
    #[serde(default)]
    narrative_summary: Option<String>,
}

impl TryFrom<RawReport> for Report {
    type Error = ReportError;

    fn try_from(raw: RawReport) -> Result<Self, Self::Error> {
        Report::new(raw.conditions, raw.status).map(|r| match raw.narrative_summary {
            Some(summary) => r.with_narrative_summary(summary),
            None => r,
        })
    }
}

/// A complete scoring result. Immutable once produced.
///
/// Always holds at least one condition and condition names are unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawReport")]
pub struct Report {
    conditions: Vec<ConditionReport>,
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    narrative_summary: Option<String>,
}

impl Report {
    pub fn new(
        conditions: Vec<ConditionReport>,
        status: impl Into<String>,
    ) -> Result<Self, ReportError> {
        if conditions.is_empty() {
            return Err(ReportError::NoConditions);
        }

        let mut seen = HashSet::new();
        for c in &conditions {
            if !seen.insert(c.condition.as_str()) {
                return Err(ReportError::DuplicateCondition(c.condition.clone()));
            }
        }

        Ok(Self {
            conditions,
            status: status.into(),
            narrative_summary: None,
        })
    }

    pub fn with_narrative_summary(mut self, summary: impl Into<String>) -> Self {
        self.narrative_summary = Some(summary.into());
        self
    }

    pub fn conditions(&self) -> &[ConditionReport] {
        &self.conditions
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn narrative_summary(&self) -> Option<&str> {
        self.narrative_summary.as_deref()
    }

    pub fn condition(&self, name: &str) -> Option<&ConditionReport> {
        self.conditions.iter().find(|c| c.condition == name)
    }

    /// Mean risk across all conditions.
    pub fn mean_risk(&self) -> Option<f64> {
        if self.conditions.is_empty() {
            return None;
        }
        let total: f64 = self.conditions.iter().map(|c| c.risk_percent.value()).sum();
        Some(total / self.conditions.len() as f64)
    }
}
