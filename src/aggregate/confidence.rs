//! Confidence score
//!
//! score = (1 - prob_downside) * exp(-k * dispersion), clamped to [0, 1], with
//! k = dispersion_weight * (1.5 - risk_tolerance). A cautious buyer (low
//! tolerance) is penalised more for the same dispersion.

use crate::config::ScoringConfig;

/// Maps downside probability and dispersion to a 0-1 confidence
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceScorer {
    /// Base penalty per unit of dispersion
    pub dispersion_weight: f64,
}

impl ConfidenceScorer {
    /// Create a scorer; negative weights are treated as zero
    pub fn new(dispersion_weight: f64) -> Self {
        Self {
            dispersion_weight: dispersion_weight.max(0.0),
        }
    }

    /// Create from ScoringConfig
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(config.dispersion_weight)
    }

    /// Score an outcome
    pub fn score(&self, prob_downside: f64, dispersion: f64, risk_tolerance: f64) -> f64 {
        if prob_downside.is_nan() || dispersion.is_nan() {
            return 0.0;
        }

        let prob_downside = prob_downside.clamp(0.0, 1.0);
        let dispersion = dispersion.max(0.0);
        let tolerance = if risk_tolerance.is_nan() {
            0.5
        } else {
            risk_tolerance.clamp(0.0, 1.0)
        };

        let k = self.dispersion_weight * (1.5 - tolerance);
        let raw = (1.0 - prob_downside) * (-k * dispersion).exp();
        raw.clamp(0.0, 1.0)
    }
}

impl Default for ConfidenceScorer {
    fn default() -> Self {
        Self::from_config(&ScoringConfig::default())
    }
}
