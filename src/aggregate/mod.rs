//! Outcome aggregation module
//!
//! Reduces a simulation batch into percentiles, downside probability,
//! dispersion and a confidence score

mod confidence;
mod percentile;

pub use confidence::ConfidenceScorer;
pub use percentile::{percentile, population_std};

use crate::error::{AnalysisError, Result};
use crate::simulation::SimulationBatch;
use serde::{Deserialize, Serialize};

/// Summary statistics of one batch against one offer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeStats {
    /// 10th percentile of final values
    pub p10: f64,
    /// Median final value
    pub p50: f64,
    /// 90th percentile of final values
    pub p90: f64,
    /// Fraction of paths ending strictly below the offer price
    pub prob_downside: f64,
    /// Annualized std dev of per-path log returns
    pub dispersion: f64,
    /// 0-1 confidence in the offer
    pub confidence_score: f64,
}

/// Computes [`OutcomeStats`] from a batch
#[derive(Debug, Clone, Default)]
pub struct OutcomeAggregator {
    scorer: ConfidenceScorer,
}

impl OutcomeAggregator {
    /// Create an aggregator with the given scorer
    pub fn new(scorer: ConfidenceScorer) -> Self {
        Self { scorer }
    }

    /// Aggregate `batch` against `offer_price`
    ///
    /// Only order-independent statistics are computed, so the result does not
    /// depend on path generation order.
    pub fn aggregate(
        &self,
        batch: &SimulationBatch,
        offer_price: f64,
        risk_tolerance: f64,
    ) -> Result<OutcomeStats> {
        if batch.is_empty() {
            return Err(AnalysisError::EmptyBatch);
        }

        let mut finals = batch.final_values();
        finals.sort_by(f64::total_cmp);

        let p10 = percentile(&finals, 10.0).ok_or(AnalysisError::EmptyBatch)?;
        let p50 = percentile(&finals, 50.0).ok_or(AnalysisError::EmptyBatch)?;
        let p90 = percentile(&finals, 90.0).ok_or(AnalysisError::EmptyBatch)?;

        let below = finals.iter().filter(|v| **v < offer_price).count();
        let prob_downside = below as f64 / finals.len() as f64;

        let dispersion = dispersion(batch);
        let confidence_score = self.scorer.score(prob_downside, dispersion, risk_tolerance);

        Ok(OutcomeStats {
            p10,
            p50,
            p90,
            prob_downside,
            dispersion,
            confidence_score,
        })
    }
}

/// Annualized dispersion of per-path log returns
fn dispersion(batch: &SimulationBatch) -> f64 {
    let log_returns: Vec<f64> = batch
        .paths()
        .iter()
        .filter(|p| p.start_value() > 0.0 && p.final_value() > 0.0)
        .map(|p| (p.final_value() / p.start_value()).ln())
        .collect();

    let years = (batch.horizon_years.max(1)) as f64;
    population_std(&log_returns) / years.sqrt()
}
