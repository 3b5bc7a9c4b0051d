//! Prometheus metrics

use std::time::Duration;

/// Latency metric types
#[derive(Debug, Clone, Copy)]
pub enum LatencyMetric {
    /// Full request pipeline
    Analysis,
    /// Path generation only
    Simulation,
    /// Explanation text generation
    Explain,
}

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Analyses started
    AnalysisRequests,
    /// Analyses rejected by validation
    InvalidRequests,
    /// Analyses that failed internally
    AnalysisErrors,
    /// Runs aborted by their deadline
    SimulationTimeouts,
    /// ZIPs served from national fallback parameters
    MarketFallbacks,
}

impl LatencyMetric {
    fn name(self) -> &'static str {
        match self {
            LatencyMetric::Analysis => "homeconfidence_analysis_latency_ms",
            LatencyMetric::Simulation => "homeconfidence_simulation_latency_ms",
            LatencyMetric::Explain => "homeconfidence_explain_latency_ms",
        }
    }
}

impl CounterMetric {
    fn name(self) -> &'static str {
        match self {
            CounterMetric::AnalysisRequests => "homeconfidence_analysis_requests_total",
            CounterMetric::InvalidRequests => "homeconfidence_invalid_requests_total",
            CounterMetric::AnalysisErrors => "homeconfidence_analysis_errors_total",
            CounterMetric::SimulationTimeouts => "homeconfidence_simulation_timeouts_total",
            CounterMetric::MarketFallbacks => "homeconfidence_market_fallbacks_total",
        }
    }
}

/// Record a latency measurement
pub fn record_latency(metric: LatencyMetric, duration: Duration) {
    let value_ms = duration.as_secs_f64() * 1_000.0;
    metrics::histogram!(metric.name()).record(value_ms);
    tracing::trace!(metric = metric.name(), value_ms, "Recorded latency");
}

/// Increment a counter by one
pub fn increment(metric: CounterMetric) {
    metrics::counter!(metric.name()).increment(1);
}
