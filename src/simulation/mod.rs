//! Monte Carlo simulation module
//!
//! Generates batches of independent geometric Brownian motion price paths

mod gbm;
mod simulator;

pub use gbm::GbmModel;
pub use simulator::{CorrectionShock, MonteCarloSimulator, ShockModel};

use crate::market::MarketParams;

/// One simulated valuation trajectory
///
/// `values[0]` is the starting value; each following entry is one period.
#[derive(Debug, Clone, PartialEq)]
pub struct PricePath {
    values: Vec<f64>,
}

impl PricePath {
    /// Wrap a sequence of valuations
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// All valuations, starting value first
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Starting valuation
    pub fn start_value(&self) -> f64 {
        self.values.first().copied().unwrap_or(0.0)
    }

    /// Valuation at the end of the horizon
    pub fn final_value(&self) -> f64 {
        self.values.last().copied().unwrap_or(0.0)
    }

    /// Number of simulated periods
    pub fn steps(&self) -> usize {
        self.values.len().saturating_sub(1)
    }
}

/// A set of paths sharing parameters and horizon
#[derive(Debug, Clone)]
pub struct SimulationBatch {
    paths: Vec<PricePath>,
    /// Parameters used for every path
    pub params: MarketParams,
    /// Horizon in years
    pub horizon_years: u32,
    /// Root seed the batch was generated from
    pub seed: u64,
}

impl SimulationBatch {
    /// Create a batch from generated paths
    pub fn new(paths: Vec<PricePath>, params: MarketParams, horizon_years: u32, seed: u64) -> Self {
        Self {
            paths,
            params,
            horizon_years,
            seed,
        }
    }

    /// Paths in generation order
    pub fn paths(&self) -> &[PricePath] {
        &self.paths
    }

    /// Number of paths
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether the batch holds no paths
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Final valuation of every path
    pub fn final_values(&self) -> Vec<f64> {
        self.paths.iter().map(PricePath::final_value).collect()
    }
}
