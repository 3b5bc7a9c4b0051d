//! Analysis error taxonomy

use thiserror::Error;

/// Errors produced by the analysis pipeline
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalysisError {
    /// Request failed validation; the caller can correct it
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    /// No reference market data for the ZIP
    #[error("Market data unavailable for ZIP {zip}: {reason}")]
    MarketDataUnavailable { zip: String, reason: String },
    /// Simulation would run zero paths or zero steps
    #[error("Degenerate simulation: {paths} paths, {steps} steps")]
    DegenerateSimulation { paths: usize, steps: usize },
    /// Aggregation over a batch with no paths
    #[error("Simulation batch is empty")]
    EmptyBatch,
    /// Run exceeded its deadline and was aborted
    #[error("Simulation timed out after {elapsed_ms}ms")]
    SimulationTimeout { elapsed_ms: u64 },
    /// Unexpected internal failure (worker panic, join error)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification used for propagation and HTTP mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Client-correctable (4xx)
    Client,
    /// Recovered internally via fallback
    Recoverable,
    /// Invariant violation (5xx)
    Internal,
    /// Operational, caller may retry
    Retryable,
}

impl AnalysisError {
    /// Classify this error
    pub fn class(&self) -> ErrorClass {
        match self {
            AnalysisError::InvalidRequest(_) => ErrorClass::Client,
            AnalysisError::MarketDataUnavailable { .. } => ErrorClass::Recoverable,
            AnalysisError::DegenerateSimulation { .. }
            | AnalysisError::EmptyBatch
            | AnalysisError::Internal(_) => ErrorClass::Internal,
            AnalysisError::SimulationTimeout { .. } => ErrorClass::Retryable,
        }
    }

    /// Shorthand for an `InvalidRequest`
    pub fn invalid(msg: impl Into<String>) -> Self {
        AnalysisError::InvalidRequest(msg.into())
    }
}

/// Result alias for the analysis pipeline
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        assert_eq!(AnalysisError::invalid("x").class(), ErrorClass::Client);
        assert_eq!(
            AnalysisError::MarketDataUnavailable {
                zip: "00000".into(),
                reason: "missing".into()
            }
            .class(),
            ErrorClass::Recoverable
        );
        assert_eq!(AnalysisError::EmptyBatch.class(), ErrorClass::Internal);
        assert_eq!(
            AnalysisError::DegenerateSimulation { paths: 0, steps: 12 }.class(),
            ErrorClass::Internal
        );
        assert_eq!(
            AnalysisError::SimulationTimeout { elapsed_ms: 10 }.class(),
            ErrorClass::Retryable
        );
    }

    #[test]
    fn test_error_display() {
        let err = AnalysisError::invalid("offer_price must be greater than 0");
        assert_eq!(
            err.to_string(),
            "Invalid request: offer_price must be greater than 0"
        );
    }
}
