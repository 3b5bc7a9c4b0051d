//! Fragility classification
//!
//! Maps (prob_downside, dispersion) to one of four ordered buckets. Downside
//! probability picks the base bucket; dispersion above a threshold bumps it
//! one level. Both inputs are monotone and NaN maps to the most severe bucket.

use crate::config::FragilityConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative downside-risk bucket, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FragilityIndex {
    Low,
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl FragilityIndex {
    /// Wire label
    pub fn as_str(&self) -> &'static str {
        match self {
            FragilityIndex::Low => "Low",
            FragilityIndex::Moderate => "Moderate",
            FragilityIndex::High => "High",
            FragilityIndex::VeryHigh => "Very High",
        }
    }

    /// Next more severe bucket, saturating at Very High
    pub fn bump(self) -> Self {
        match self {
            FragilityIndex::Low => FragilityIndex::Moderate,
            FragilityIndex::Moderate => FragilityIndex::High,
            FragilityIndex::High | FragilityIndex::VeryHigh => FragilityIndex::VeryHigh,
        }
    }
}

impl fmt::Display for FragilityIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Threshold-band fragility classifier
#[derive(Debug, Clone)]
pub struct FragilityClassifier {
    moderate_downside: f64,
    high_downside: f64,
    very_high_downside: f64,
    dispersion_bump: f64,
}

impl FragilityClassifier {
    /// Create from FragilityConfig
    ///
    /// Downside thresholds are sorted so the bands stay ordered even when
    /// configured out of order.
    pub fn from_config(config: &FragilityConfig) -> Self {
        let mut bands = [
            config.moderate_downside,
            config.high_downside,
            config.very_high_downside,
        ];
        bands.sort_by(f64::total_cmp);
        Self {
            moderate_downside: bands[0],
            high_downside: bands[1],
            very_high_downside: bands[2],
            dispersion_bump: config.dispersion_bump,
        }
    }

    /// Classify an outcome
    pub fn classify(&self, prob_downside: f64, dispersion: f64) -> FragilityIndex {
        // NaN fails every comparison and falls through to Very High
        let base = if prob_downside < self.moderate_downside {
            FragilityIndex::Low
        } else if prob_downside < self.high_downside {
            FragilityIndex::Moderate
        } else if prob_downside < self.very_high_downside {
            FragilityIndex::High
        } else {
            FragilityIndex::VeryHigh
        };

        // NaN dispersion bumps
        if dispersion.is_nan() || dispersion > self.dispersion_bump {
            base.bump()
        } else {
            base
        }
    }
}

impl Default for FragilityClassifier {
    fn default() -> Self {
        Self::from_config(&FragilityConfig::default())
    }
}
