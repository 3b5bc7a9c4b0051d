//! Fair value band estimation
//!
//! Closed-form band around the current market value, widened by the market's
//! volatility. Independent of the offer price and of any simulation batch.

use crate::config::FairValueConfig;
use crate::market::MarketParams;
use serde::{Deserialize, Serialize};

/// ZIP-level fair value range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FairValueBand {
    pub low: f64,
    pub high: f64,
}

impl FairValueBand {
    /// Whether `price` falls inside the band
    pub fn contains(&self, price: f64) -> bool {
        (self.low..=self.high).contains(&price)
    }
}

/// Computes [`FairValueBand`]s
#[derive(Debug, Clone)]
pub struct FairValueEstimator {
    band_z: f64,
    min_half_width: f64,
    max_half_width: f64,
}

impl FairValueEstimator {
    /// Create from FairValueConfig
    ///
    /// Half-widths are kept within [0, 0.95] so the low end stays positive.
    pub fn from_config(config: &FairValueConfig) -> Self {
        let lo = config.min_half_width.clamp(0.0, 0.95);
        let hi = config.max_half_width.clamp(lo, 0.95);
        Self {
            band_z: config.band_z.max(0.0),
            min_half_width: lo,
            max_half_width: hi,
        }
    }

    /// Half-width as a fraction of value for the given parameters
    pub fn half_width(&self, params: &MarketParams) -> f64 {
        (self.band_z * params.volatility).clamp(self.min_half_width, self.max_half_width)
    }

    /// Band for a home currently worth `current_value`
    pub fn estimate(&self, params: &MarketParams, current_value: f64) -> FairValueBand {
        let value = current_value.max(0.0);
        let w = self.half_width(params);
        FairValueBand {
            low: value * (1.0 - w),
            high: value * (1.0 + w),
        }
    }
}

impl Default for FairValueEstimator {
    fn default() -> Self {
        Self::from_config(&FairValueConfig::default())
    }
}
