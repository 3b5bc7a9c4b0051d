//! Analysis engine
//!
//! Runs the full pipeline for one request: validate, resolve market
//! parameters (falling back to national averages), simulate, aggregate,
//! classify, estimate fair value and affordability, then assemble.

use crate::affordability::AffordabilityCalculator;
use crate::aggregate::{ConfidenceScorer, OutcomeAggregator};
use crate::config::Config;
use crate::error::{AnalysisError, ErrorClass, Result};
use crate::fair_value::FairValueEstimator;
use crate::fragility::FragilityClassifier;
use crate::market::{MarketAssessment, MarketDataSource, MarketModel, ZhviDataset};
use crate::report::{assemble, AnalysisResult, ReportParts};
use crate::request::{validate, AnalysisRequest, ValidatedRequest};
use crate::simulation::MonteCarloSimulator;
use crate::telemetry::{increment, record_latency, CounterMetric, LatencyMetric};
use rand::Rng;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// End-to-end analysis pipeline
pub struct Analyzer {
    market: MarketModel,
    simulator: MonteCarloSimulator,
    aggregator: OutcomeAggregator,
    fragility: FragilityClassifier,
    fair_value: FairValueEstimator,
    affordability: AffordabilityCalculator,
    default_seed: Option<u64>,
    timeout: Duration,
}

impl Analyzer {
    /// Build an analyzer over an explicit market data source
    pub fn new(source: Arc<dyn MarketDataSource>, config: &Config) -> Self {
        Self {
            market: MarketModel::new(source, config.market.clone()),
            simulator: MonteCarloSimulator::from_config(&config.simulation),
            aggregator: OutcomeAggregator::new(ConfidenceScorer::from_config(&config.scoring)),
            fragility: FragilityClassifier::from_config(&config.fragility),
            fair_value: FairValueEstimator::from_config(&config.fair_value),
            affordability: AffordabilityCalculator::from_config(&config.affordability),
            default_seed: config.simulation.seed,
            timeout: Duration::from_millis(config.simulation.timeout_ms),
        }
    }

    /// Build an analyzer, loading market data from `market.data_path`
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let dataset = match &config.market.data_path {
            Some(path) => ZhviDataset::load(path)?,
            None => {
                tracing::warn!(
                    "No market data configured; every ZIP will use national fallback parameters"
                );
                ZhviDataset::default()
            }
        };
        Ok(Self::new(Arc::new(dataset), config))
    }

    /// Replace the simulator
    pub fn with_simulator(mut self, simulator: MonteCarloSimulator) -> Self {
        self.simulator = simulator;
        self
    }

    /// Paths per run
    pub fn paths(&self) -> usize {
        self.simulator.paths
    }

    /// ZIPs with market history
    pub fn zips(&self) -> Vec<String> {
        self.market.zips()
    }

    /// Analyze a request under the configured timeout
    pub fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        self.analyze_until(request, Some(Instant::now() + self.timeout))
    }

    /// Analyze a request, aborting once `deadline` passes
    pub fn analyze_until(
        &self,
        request: &AnalysisRequest,
        deadline: Option<Instant>,
    ) -> Result<AnalysisResult> {
        increment(CounterMetric::AnalysisRequests);

        let validated = validate(request).inspect_err(|e| {
            increment(CounterMetric::InvalidRequests);
            tracing::info!(zip = %request.zip, error = %e, "Rejected analysis request");
        })?;

        let span = tracing::info_span!(
            "analysis",
            request_id = %uuid::Uuid::new_v4(),
            zip = %validated.zip,
            horizon_years = validated.horizon_years,
            paths = self.simulator.paths,
        );
        let _entered = span.enter();

        let started = Instant::now();
        let result = self.run_pipeline(&validated, deadline);
        record_latency(LatencyMetric::Analysis, started.elapsed());

        if let Err(e) = &result {
            match e.class() {
                ErrorClass::Retryable => {
                    increment(CounterMetric::SimulationTimeouts);
                    tracing::warn!(
                        zip = %validated.zip,
                        horizon_years = validated.horizon_years,
                        paths = self.simulator.paths,
                        error = %e,
                        "Analysis aborted"
                    );
                }
                _ => {
                    increment(CounterMetric::AnalysisErrors);
                    tracing::error!(
                        zip = %validated.zip,
                        horizon_years = validated.horizon_years,
                        paths = self.simulator.paths,
                        steps_per_year = self.simulator.steps_per_year,
                        error = %e,
                        "Analysis failed"
                    );
                }
            }
        }

        result
    }

    /// Run [`Analyzer::analyze`] on the blocking pool
    pub async fn analyze_async(self: Arc<Self>, request: AnalysisRequest) -> Result<AnalysisResult> {
        let deadline = Instant::now() + self.timeout;
        let span = tracing::Span::current();
        tokio::task::spawn_blocking(move || {
            let _entered = span.enter();
            self.analyze_until(&request, Some(deadline))
        })
        .await
        .map_err(|e| AnalysisError::Internal(format!("analysis task failed: {}", e)))?
    }

    /// Market parameters for a request, with explicit national fallback
    pub fn resolve_market(&self, request: &ValidatedRequest) -> Result<MarketAssessment> {
        match self.market.assess(&request.zip, request.current_price) {
            Ok(assessment) => Ok(assessment),
            Err(AnalysisError::MarketDataUnavailable { zip, reason }) => {
                increment(CounterMetric::MarketFallbacks);
                tracing::warn!(
                    zip = %zip,
                    reason = %reason,
                    "Market data unavailable; using national fallback parameters"
                );
                Ok(self.market.national_fallback())
            }
            Err(e) => Err(e),
        }
    }

    fn run_pipeline(
        &self,
        request: &ValidatedRequest,
        deadline: Option<Instant>,
    ) -> Result<AnalysisResult> {
        let market = self.resolve_market(request)?;
        let seed = self.resolve_seed(request);

        let sim_started = Instant::now();
        let batch = self.simulator.run(
            request.current_price,
            market.params,
            request.horizon_years,
            seed,
            deadline,
        )?;
        record_latency(LatencyMetric::Simulation, sim_started.elapsed());

        let mut stats = self
            .aggregator
            .aggregate(&batch, request.offer_price, request.risk_tolerance)?;
        let factor = self.market.confidence_factor(market.source);
        stats.confidence_score = (stats.confidence_score * factor).clamp(0.0, 1.0);

        let fragility = self.fragility.classify(stats.prob_downside, stats.dispersion);
        let fair_value = self.fair_value.estimate(&market.params, request.current_price);
        let affordability = self.affordability.evaluate(
            request.offer_price,
            request.down_payment_pct,
            request.income,
        );

        if let Some(features) = &request.home_features {
            tracing::debug!(
                sqft = features.sqft,
                beds = features.beds,
                baths = features.baths,
                property_type = %features.property_type,
                "Home features supplied"
            );
        }

        let result = assemble(ReportParts {
            stats,
            fragility,
            fair_value,
            affordability,
            market_data: market.source,
            seed,
        });

        tracing::info!(
            seed,
            drift = market.params.drift,
            volatility = market.params.volatility,
            confidence = result.confidence_score,
            prob_downside = result.prob_downside,
            fragility = %result.fragility_index,
            "Analysis complete"
        );

        Ok(result)
    }

    /// Request seed, else configured seed, else fresh entropy
    ///
    /// Fresh seeds are kept below 2^53 so they survive a JSON round trip
    /// through JavaScript numbers.
    fn resolve_seed(&self, request: &ValidatedRequest) -> u64 {
        request
            .seed
            .or(self.default_seed)
            .unwrap_or_else(|| rand::thread_rng().gen::<u64>() >> 11)
    }
}
