//! Risk banding - the single threshold table for Low/Moderate/High.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound (inclusive) of the Moderate band.
pub const MODERATE_THRESHOLD: f64 = 20.0;

/// Lower bound (inclusive) of the High band.
pub const HIGH_THRESHOLD: f64 = 50.0;

/// Three-level risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskBand {
    Low,
    Moderate,
    High,
}

impl RiskBand {
    /// Maps a risk percentage to its band.
    ///
    /// `>= 50` is High, `[20, 50)` is Moderate, anything below 20 is Low.
    pub fn classify(risk_percent: f64) -> Self {
        if risk_percent >= HIGH_THRESHOLD {
            RiskBand::High
        } else if risk_percent >= MODERATE_THRESHOLD {
            RiskBand::Moderate
        } else {
            RiskBand::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskBand::Low => "Low",
            RiskBand::Moderate => "Moderate",
            RiskBand::High => "High",
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_inclusive_on_the_lower_edge() {
        assert_eq!(RiskBand::classify(49.0), RiskBand::Moderate);
        assert_eq!(RiskBand::classify(50.0), RiskBand::High);
        assert_eq!(RiskBand::classify(19.0), RiskBand::Low);
        assert_eq!(RiskBand::classify(20.0), RiskBand::Moderate);
    }

    #[test]
    fn fractional_values_near_boundaries() {
        assert_eq!(RiskBand::classify(49.99), RiskBand::Moderate);
        assert_eq!(RiskBand::classify(19.99), RiskBand::Low);
        assert_eq!(RiskBand::classify(0.0), RiskBand::Low);
        assert_eq!(RiskBand::classify(100.0), RiskBand::High);
    }

    #[test]
    fn bands_order_by_severity() {
        assert!(RiskBand::High > RiskBand::Moderate);
        assert!(RiskBand::Moderate > RiskBand::Low);
    }
}
