//! ZIP-level market model with home-level adjustment and national fallback

use super::{
    MarketAssessment, MarketDataSource, MarketDataSourceKind, MarketParams, VolatilityEstimator,
};
use crate::config::MarketConfig;
use crate::error::{AnalysisError, Result};
use std::sync::Arc;

/// Resolves simulation parameters for a ZIP
pub struct MarketModel {
    source: Arc<dyn MarketDataSource>,
    config: MarketConfig,
}

impl MarketModel {
    /// Create a model over a data source
    pub fn new(source: Arc<dyn MarketDataSource>, config: MarketConfig) -> Self {
        Self { source, config }
    }

    /// Parameters for a home in `zip` currently worth `current_price`
    ///
    /// Volatility is scaled up from the smoothed index level to the individual
    /// home, and further when the home's value deviates from the ZIP's latest
    /// index value. Fails with `MarketDataUnavailable` when the ZIP is unknown
    /// or its history is too short.
    pub fn assess(&self, zip: &str, current_price: f64) -> Result<MarketAssessment> {
        let series = self.source.series(zip)?;

        if series.values.len() < self.config.min_history_months {
            return Err(AnalysisError::MarketDataUnavailable {
                zip: zip.to_string(),
                reason: format!(
                    "insufficient history ({} months, need {})",
                    series.values.len(),
                    self.config.min_history_months
                ),
            });
        }

        let estimator =
            VolatilityEstimator::from_series(self.config.history_window_months, &series.values);
        let index_params = estimator
            .estimate()
            .ok_or_else(|| AnalysisError::MarketDataUnavailable {
                zip: zip.to_string(),
                reason: "no usable returns in index history".to_string(),
            })?;

        let deviation = series
            .latest()
            .filter(|v| *v > 0.0)
            .map(|latest| (current_price / latest - 1.0).abs())
            .unwrap_or(0.0)
            .min(self.config.max_price_deviation);
        let volatility = index_params.volatility
            * self.config.individual_vol_multiplier
            * (1.0 + self.config.deviation_vol_factor * deviation);

        tracing::debug!(
            zip,
            index_drift = index_params.drift,
            index_volatility = index_params.volatility,
            standard_error = estimator.standard_error(),
            deviation,
            volatility,
            "Estimated market parameters"
        );

        Ok(MarketAssessment {
            params: MarketParams::new(index_params.drift, volatility),
            source: MarketDataSourceKind::Zip,
        })
    }

    /// National-average parameters used when a ZIP cannot be assessed
    pub fn national_fallback(&self) -> MarketAssessment {
        MarketAssessment {
            params: MarketParams::new(self.config.national_drift, self.config.national_volatility),
            source: MarketDataSourceKind::NationalFallback,
        }
    }

    /// Confidence multiplier for a given provenance
    pub fn confidence_factor(&self, source: MarketDataSourceKind) -> f64 {
        match source {
            MarketDataSourceKind::Zip => 1.0,
            MarketDataSourceKind::NationalFallback => {
                self.config.fallback_confidence_factor.clamp(0.0, 1.0)
            }
        }
    }

    /// ZIPs with reference data
    pub fn zips(&self) -> Vec<String> {
        self.source.zips()
    }
}
