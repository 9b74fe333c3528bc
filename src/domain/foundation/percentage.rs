//! Risk percentage value object (0-100 scale, fractional).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A risk probability expressed as a percentage in `[0, 100]`.
///
/// The scoring service reports risk with two decimals (e.g. `37.52`), so the
/// value is kept as `f64` rather than rounded.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct RiskPercent(f64);

impl RiskPercent {
    /// Zero percent.
    pub const ZERO: Self = Self(0.0);

    /// Creates a RiskPercent, returning error if out of range or not finite.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::invalid_format("risk", "must be a finite number"));
        }
        if !(0.0..=100.0).contains(&value) {
            return Err(ValidationError::invalid_format(
                "risk",
                format!("must be between 0 and 100, got {}", value),
            ));
        }
        Ok(Self(value))
    }

    /// Returns the raw percentage.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for RiskPercent {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<RiskPercent> for f64 {
    fn from(p: RiskPercent) -> Self {
        p.0
    }
}

impl Default for RiskPercent {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for RiskPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
