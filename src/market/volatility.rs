//! Drift and volatility estimation
//!
//! Trailing-window log-return statistics over a monthly index series

use super::MarketParams;
use std::collections::VecDeque;

/// Months per year used for annualization
pub const PERIODS_PER_YEAR: f64 = 12.0;

/// Trailing-window estimator of annualized drift and volatility
pub struct VolatilityEstimator {
    /// Maximum number of observations kept (0 = unbounded)
    window: usize,
    /// Index values, oldest first
    values: VecDeque<f64>,
}

impl VolatilityEstimator {
    /// Create an estimator keeping the last `window` observations
    pub fn new(window: usize) -> Self {
        Self {
            window,
            values: VecDeque::new(),
        }
    }

    /// Build an estimator from a whole series
    pub fn from_series(window: usize, values: &[f64]) -> Self {
        let mut estimator = Self::new(window);
        for &v in values {
            estimator.update(v);
        }
        estimator
    }

    /// Add a new monthly observation
    pub fn update(&mut self, value: f64) {
        self.values.push_back(value);

        if self.window > 0 {
            while self.values.len() > self.window {
                self.values.pop_front();
            }
        }
    }

    /// Number of observations currently held
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no observations are held
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn log_returns(&self) -> Vec<f64> {
        self.values
            .iter()
            .zip(self.values.iter().skip(1))
            .filter(|(prev, curr)| **prev > 0.0 && **curr > 0.0)
            .map(|(prev, curr)| (curr / prev).ln())
            .collect()
    }

    /// Annualized parameters from monthly log returns
    ///
    /// sigma = s * sqrt(12) from the sample std `s`; mu = 12 * mean + sigma^2 / 2
    /// so the simulated median path tracks historical log growth. Needs at
    /// least two returns.
    pub fn estimate(&self) -> Option<MarketParams> {
        let returns = self.log_returns();
        if returns.len() < 2 {
            return None;
        }

        let n = returns.len() as f64;
        let mean = returns.iter().sum::<f64>() / n;
        let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
        let monthly_std = variance.sqrt();

        let volatility = monthly_std * PERIODS_PER_YEAR.sqrt();
        let drift = mean * PERIODS_PER_YEAR + 0.5 * volatility * volatility;

        Some(MarketParams::new(drift, volatility))
    }

    /// Standard error of the volatility estimate
    pub fn standard_error(&self) -> Option<f64> {
        let params = self.estimate()?;
        // SE ~= vol / sqrt(2n)
        Some(params.volatility / (2.0 * self.log_returns().len() as f64).sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_volatility_estimator_new() {
        let estimator = VolatilityEstimator::new(12);
        assert!(estimator.estimate().is_none());
        assert!(estimator.is_empty());
    }

    #[test]
    fn test_two_prices_insufficient() {
        let estimator = VolatilityEstimator::from_series(0, &[100.0, 101.0]);
        // One return is not enough for a sample std
        assert!(estimator.estimate().is_none());
    }

    #[test]
    fn test_constant_growth_has_zero_volatility() {
        let values: Vec<f64> = (0..24).map(|i| 100.0 * 1.005f64.powi(i)).collect();
        let params = VolatilityEstimator::from_series(0, &values).estimate().unwrap();

        assert!(params.volatility < 1e-9);
        assert_relative_eq!(params.drift, 12.0 * 1.005f64.ln(), epsilon = 1e-9);
    }

    #[test]
    fn test_flat_series() {
        let values = vec![250_000.0; 18];
        let params = VolatilityEstimator::from_series(0, &values).estimate().unwrap();
        assert!(params.volatility.abs() < 1e-12);
        assert!(params.drift.abs() < 1e-12);
    }

    #[test]
    fn test_noisy_series_positive_volatility() {
        let values = [100.0, 102.0, 99.0, 103.0, 98.0, 104.0, 101.0];
        let params = VolatilityEstimator::from_series(0, &values).estimate().unwrap();
        assert!(params.volatility > 0.0);
    }

    #[test]
    fn test_window_drops_old_observations() {
        let mut estimator = VolatilityEstimator::new(3);
        for v in [100.0, 50.0, 200.0, 201.0, 202.0] {
            estimator.update(v);
        }
        assert_eq!(estimator.len(), 3);
        // Only the calm tail remains
        let params = estimator.estimate().unwrap();
        assert!(params.volatility < 0.01);
    }

    #[test]
    fn test_non_positive_values_skipped() {
        let values = [100.0, 0.0, 101.0, 102.0, 103.0];
        let estimator = VolatilityEstimator::from_series(0, &values);
        assert!(estimator.estimate().is_some());
    }

    #[test]
    fn test_standard_error() {
        let values: Vec<f64> = (0..30)
            .map(|i| 100.0 + if i % 2 == 0 { 1.0 } else { -1.0 })
            .collect();
        let estimator = VolatilityEstimator::from_series(0, &values);
        let se = estimator.standard_error().unwrap();
        assert!(se > 0.0);
        assert!(se < estimator.estimate().unwrap().volatility);
    }

    #[test]
    fn test_standard_error_insufficient_data() {
        let estimator = VolatilityEstimator::new(0);
        assert!(estimator.standard_error().is_none());
    }
}
