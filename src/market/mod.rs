//! Market model module
//!
//! Derives stochastic-process parameters for a ZIP code from a historical
//! home value index, adjusted to the individual home being analyzed.

mod model;
mod volatility;
mod zhvi;

pub use model::MarketModel;
pub use volatility::VolatilityEstimator;
pub use zhvi::ZhviDataset;

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Annualized drift and volatility of a geometric price process
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketParams {
    /// Expected continuous annual drift (mu)
    pub drift: f64,
    /// Annual volatility (sigma), never negative
    pub volatility: f64,
}

impl MarketParams {
    /// Create parameters, clamping volatility at zero
    pub fn new(drift: f64, volatility: f64) -> Self {
        Self {
            drift,
            volatility: volatility.max(0.0),
        }
    }
}

/// Where a set of market parameters came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketDataSourceKind {
    /// Estimated from the ZIP's own index history
    Zip,
    /// ZIP had no usable data; national averages used
    NationalFallback,
}

/// Market model output for one request
#[derive(Debug, Clone, PartialEq)]
pub struct MarketAssessment {
    /// Parameters to simulate with
    pub params: MarketParams,
    /// Provenance of `params`
    pub source: MarketDataSourceKind,
}

/// Monthly index history for one ZIP, oldest first
#[derive(Debug, Clone, PartialEq)]
pub struct ZipSeries {
    pub zip: String,
    pub values: Vec<f64>,
}

impl ZipSeries {
    /// Most recent index value
    pub fn latest(&self) -> Option<f64> {
        self.values.last().copied()
    }
}

/// Trait for historical market data providers
pub trait MarketDataSource: Send + Sync {
    /// Monthly series for a normalized 5-digit ZIP
    ///
    /// Fails with `MarketDataUnavailable` when the ZIP is unknown.
    fn series(&self, zip: &str) -> Result<ZipSeries>;

    /// All ZIPs this source can answer for
    fn zips(&self) -> Vec<String>;
}
