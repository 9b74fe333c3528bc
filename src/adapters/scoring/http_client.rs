//! HTTP Scoring Client - `ScoringService` over the risk model's REST API.
//!
//! Posts the canonical payload to `{base_url}/api/analyze` and translates the
//! service's wire format into a domain `Report`.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpScoringConfig::new("http://scoring:5000")
//!     .with_api_key("secret")
//!     .with_timeout(Duration::from_secs(120));
//!
//! let client = HttpScoringClient::new(config)?;
//! ```
//!
//! No retries: a failed call is surfaced as-is and the caller resubmits.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use crate::domain::foundation::RiskPercent;
use crate::domain::questionnaire::CanonicalPayload;
use crate::domain::report::{ConditionReport, Report, RiskDirection, RiskFactor};
use crate::ports::{ScoringError, ScoringService};

/// Configuration for the HTTP scoring client.
#[derive(Debug, Clone)]
pub struct HttpScoringConfig {
    pub base_url: String,
    api_key: Option<Secret<String>>,
    pub timeout: Duration,
}

impl HttpScoringConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(Secret::new(api_key.into()));
        self
    }

    pub fn with_secret_api_key(mut self, api_key: Option<Secret<String>>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Scoring service client.
pub struct HttpScoringClient {
    config: HttpScoringConfig,
    client: Client,
}

impl HttpScoringClient {
    pub fn new(config: HttpScoringConfig) -> Result<Self, ScoringError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ScoringError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn analyze_url(&self) -> String {
        format!("{}/api/analyze", self.config.base_url.trim_end_matches('/'))
    }

    async fn send(&self, payload: &CanonicalPayload) -> Result<Response, ScoringError> {
        let mut request = self.client.post(self.analyze_url()).json(payload);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        request.send().await.map_err(|e| {
            if e.is_timeout() {
                ScoringError::Timeout {
                    timeout_secs: self.config.timeout.as_secs(),
                }
            } else if e.is_connect() {
                ScoringError::Network(format!("connection failed: {}", e))
            } else {
                ScoringError::Network(e.to_string())
            }
        })
    }
}

#[async_trait]
impl ScoringService for HttpScoringClient {
    async fn score(&self, payload: &CanonicalPayload) -> Result<Report, ScoringError> {
        tracing::debug!(url = %self.analyze_url(), answers = payload.len(), "calling scoring service");

        let response = self.send(payload).await?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ScoringError::Network(format!("failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(ScoringError::Status {
                status: status.as_u16(),
                body,
            });
        }

        parse_analysis(&body)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Wire format
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
struct AnalysisResponse {
    status: String,
    #[serde(default)]
    report: Vec<DiseaseReport>,
    #[serde(default)]
    ai_summary: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DiseaseReport {
    disease: String,
    risk: f64,
    #[serde(default)]
    risk_band: Option<String>,
    #[serde(default)]
    recommendation: String,
    #[serde(default)]
    risk_factors: Vec<WireFactor>,
}

#[derive(Debug, Deserialize)]
struct WireFactor {
    factor: String,
    delta: f64,
    direction: RiskDirection,
}

/// Translates a 2xx response body into a `Report`.
fn parse_analysis(body: &str) -> Result<Report, ScoringError> {
    let response: AnalysisResponse = serde_json::from_str(body)
        .map_err(|e| ScoringError::Malformed(format!("invalid JSON: {}", e)))?;

    if response.status != "success" {
        return Err(ScoringError::Rejected(
            response.error.unwrap_or_else(|| format!("status '{}'", response.status)),
        ));
    }

    let conditions = response
        .report
        .into_iter()
        .map(into_condition)
        .collect::<Result<Vec<_>, _>>()?;

    let report = Report::new(conditions, response.status)
        .map_err(|e| ScoringError::Malformed(e.to_string()))?;

    Ok(match response.ai_summary {
        Some(summary) if !summary.trim().is_empty() => report.with_narrative_summary(summary),
        _ => report,
    })
}

fn into_condition(wire: DiseaseReport) -> Result<ConditionReport, ScoringError> {
    let risk = RiskPercent::try_new(wire.risk)
        .map_err(|e| ScoringError::Malformed(format!("{}: {}", wire.disease, e)))?;

    let factors = wire
        .risk_factors
        .into_iter()
        .map(|f| RiskFactor::new(f.factor, f.delta, f.direction))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ScoringError::Malformed(format!("{}: {}", wire.disease, e)))?;

    let condition = ConditionReport::new(wire.disease, risk, wire.recommendation).with_factors(factors);
    Ok(match wire.risk_band {
        Some(band) => condition.with_reported_band(band),
        None => condition,
    })
}
