//! Monte Carlo path generation
//!
//! Path `i` draws from its own ChaCha8 stream (`seed`, stream `i`), so a
//! batch is identical whether paths are generated sequentially or on the
//! rayon pool, in any order.

use super::{GbmModel, PricePath, SimulationBatch};
use crate::config::{ShockDistribution, SimulationConfig};
use crate::error::{AnalysisError, Result};
use crate::market::MarketParams;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{StandardNormal, StudentT};
use rayon::prelude::*;
use std::time::Instant;

/// One-time market correction applied to a random subset of paths
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrectionShock {
    /// Probability a path is hit
    pub probability: f64,
    /// Smallest drawdown fraction
    pub min_drawdown: f64,
    /// Largest drawdown fraction
    pub max_drawdown: f64,
}

impl CorrectionShock {
    /// Build a shock, or `None` when the probability disables it
    pub fn new(probability: f64, min_drawdown: f64, max_drawdown: f64) -> Option<Self> {
        if probability.is_nan() || probability <= 0.0 {
            return None;
        }
        let lo = min_drawdown.min(max_drawdown).clamp(0.0, 0.99);
        let hi = min_drawdown.max(max_drawdown).clamp(0.0, 0.99);
        Some(Self {
            probability: probability.min(1.0),
            min_drawdown: lo,
            max_drawdown: hi,
        })
    }
}

/// Distribution of the per-step shock `Z`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShockModel {
    /// Standard normal
    Normal,
    /// Student's t with `df` degrees of freedom, scaled to unit variance
    StudentT { df: f64 },
}

impl ShockModel {
    /// Fat-tailed shocks, or `None` when `df` leaves the variance undefined
    pub fn student_t(df: f64) -> Option<Self> {
        if df.is_finite() && df > 2.0 {
            Some(ShockModel::StudentT { df })
        } else {
            None
        }
    }
}

/// Sampler built once per run
enum ShockSampler {
    Normal,
    StudentT { dist: StudentT<f64>, scale: f64 },
}

impl ShockSampler {
    fn new(model: ShockModel) -> Result<Self> {
        match model {
            ShockModel::Normal => Ok(ShockSampler::Normal),
            ShockModel::StudentT { df } => {
                let dist = StudentT::new(df).map_err(|e| {
                    AnalysisError::Internal(format!("invalid t distribution (df {}): {}", df, e))
                })?;
                Ok(ShockSampler::StudentT {
                    dist,
                    scale: ((df - 2.0) / df).sqrt(),
                })
            }
        }
    }

    #[inline]
    fn draw<R: Rng>(&self, rng: &mut R) -> f64 {
        match self {
            ShockSampler::Normal => rng.sample(StandardNormal),
            ShockSampler::StudentT { dist, scale } => rng.sample(dist) * scale,
        }
    }
}

/// Generates simulation batches
#[derive(Debug, Clone)]
pub struct MonteCarloSimulator {
    /// Paths per batch
    pub paths: usize,
    /// Periods per simulated year
    pub steps_per_year: u32,
    /// Use the rayon pool
    pub parallel: bool,
    /// Optional correction shock
    pub correction: Option<CorrectionShock>,
    /// Per-step shock distribution
    pub shocks: ShockModel,
}

impl MonteCarloSimulator {
    /// Create a simulator without correction shocks
    pub fn new(paths: usize, steps_per_year: u32) -> Self {
        Self {
            paths,
            steps_per_year,
            parallel: true,
            correction: None,
            shocks: ShockModel::Normal,
        }
    }

    /// Create from SimulationConfig
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            paths: config.paths,
            steps_per_year: config.steps_per_year,
            parallel: config.parallel,
            correction: CorrectionShock::new(
                config.correction_probability,
                config.correction_min,
                config.correction_max,
            ),
            shocks: shock_model(config),
        }
    }

    /// Toggle parallel generation
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the shock distribution
    pub fn with_shocks(mut self, shocks: ShockModel) -> Self {
        self.shocks = shocks;
        self
    }

    /// Set the correction shock
    pub fn with_correction(mut self, correction: Option<CorrectionShock>) -> Self {
        self.correction = correction;
        self
    }

    /// Simulate `self.paths` paths from `start` over `horizon_years`
    ///
    /// Fails with `DegenerateSimulation` when there would be no paths or no
    /// steps, and with `SimulationTimeout` once `deadline` passes. No partial
    /// batch is ever returned.
    pub fn run(
        &self,
        start: f64,
        params: MarketParams,
        horizon_years: u32,
        seed: u64,
        deadline: Option<Instant>,
    ) -> Result<SimulationBatch> {
        let steps = horizon_years as usize * self.steps_per_year as usize;
        if self.paths == 0 || steps == 0 {
            return Err(AnalysisError::DegenerateSimulation {
                paths: self.paths,
                steps,
            });
        }

        let started = Instant::now();
        let model = GbmModel::new(params);
        let sampler = ShockSampler::new(self.shocks)?;
        let dt = 1.0 / self.steps_per_year as f64;

        let generate = |index: usize| -> Result<PricePath> {
            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    return Err(AnalysisError::SimulationTimeout {
                        elapsed_ms: started.elapsed().as_millis() as u64,
                    });
                }
            }
            Ok(self.simulate_path(&model, &sampler, start, steps, dt, seed, index))
        };

        let paths: Vec<PricePath> = if self.parallel {
            (0..self.paths).into_par_iter().map(generate).collect::<Result<_>>()?
        } else {
            (0..self.paths).map(generate).collect::<Result<_>>()?
        };

        tracing::debug!(
            paths = paths.len(),
            steps,
            seed,
            parallel = self.parallel,
            elapsed_us = started.elapsed().as_micros() as u64,
            "Simulation batch generated"
        );

        Ok(SimulationBatch::new(paths, params, horizon_years, seed))
    }

    #[allow(clippy::too_many_arguments)]
    fn simulate_path(
        &self,
        model: &GbmModel,
        sampler: &ShockSampler,
        start: f64,
        steps: usize,
        dt: f64,
        seed: u64,
        index: usize,
    ) -> PricePath {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(index as u64);

        // (step, remaining fraction) of this path's correction, if any
        let shock = self.correction.and_then(|c| {
            if rng.gen::<f64>() < c.probability {
                let at = rng.gen_range(0..steps);
                let drawdown = rng.gen_range(c.min_drawdown..=c.max_drawdown);
                Some((at, 1.0 - drawdown))
            } else {
                None
            }
        });

        let mut values = Vec::with_capacity(steps + 1);
        let mut value = start;
        values.push(value);

        for step in 0..steps {
            let z = sampler.draw(&mut rng);
            value = model.step(value, dt, z);
            if let Some((at, remaining)) = shock {
                if step == at {
                    value *= remaining;
                }
            }
            values.push(value);
        }

        PricePath::new(values)
    }
}

fn shock_model(config: &SimulationConfig) -> ShockModel {
    match config.shock_distribution {
        ShockDistribution::Normal => ShockModel::Normal,
        ShockDistribution::StudentT => ShockModel::student_t(config.shock_df).unwrap_or_else(|| {
            tracing::warn!(
                df = config.shock_df,
                "shock_df must exceed 2; using normal shocks"
            );
            ShockModel::Normal
        }),
    }
}
