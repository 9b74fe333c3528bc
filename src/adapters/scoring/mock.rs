//! Mock Scoring Service for testing.
//!
//! Returns queued results in order, falling back to a canned two-condition
//! report once the queue is empty. Every payload received is recorded.
//!
//! ```ignore
//! let scoring = MockScoringService::new()
//!     .with_error(ScoringError::Timeout { timeout_secs: 120 });
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::foundation::RiskPercent;
use crate::domain::questionnaire::CanonicalPayload;
use crate::domain::report::{ConditionReport, Report, ReportError, RiskDirection, RiskFactor};
use crate::ports::{ScoringError, ScoringService};

#[derive(Debug, Clone, Default)]
pub struct MockScoringService {
    queued: Arc<Mutex<VecDeque<Result<Report, ScoringError>>>>,
    calls: Arc<Mutex<Vec<CanonicalPayload>>>,
}

impl MockScoringService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_report(self, report: Report) -> Self {
        self.push(Ok(report));
        self
    }

    pub fn with_error(self, error: ScoringError) -> Self {
        self.push(Err(error));
        self
    }

    fn push(&self, result: Result<Report, ScoringError>) {
        if let Ok(mut queue) = self.queued.lock() {
            queue.push_back(result);
        }
    }

    /// Payloads received so far, in call order.
    pub fn calls(&self) -> Vec<CanonicalPayload> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }

    /// Report returned when nothing is queued.
    pub fn canned_report() -> Result<Report, ReportError> {
        let diabetes = ConditionReport::new("Diabetes", RiskPercent::ZERO, "Maintain a balanced diet")
            .with_factors(vec![RiskFactor {
                factor: "PhysicalActivity".to_string(),
                delta: 2.5,
                direction: RiskDirection::Reduced,
            }]);
        let heart = ConditionReport::new("HeartDisease", RiskPercent::ZERO, "Keep up regular exercise");

        Ok(Report::new(vec![diabetes, heart], "success")?
            .with_narrative_summary("No significant risks detected."))
    }
}

#[async_trait]
impl ScoringService for MockScoringService {
    async fn score(&self, payload: &CanonicalPayload) -> Result<Report, ScoringError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(payload.clone());
        }
        let next = self.queued.lock().ok().and_then(|mut q| q.pop_front());
        next.unwrap_or_else(|| {
            Self::canned_report().map_err(|e| ScoringError::Malformed(e.to_string()))
        })
    }
}
