//! Geometric Brownian Motion price model
//!
//! Discrete step: S' = S * exp((mu - sigma^2/2) * dt + sigma * sqrt(dt) * Z)
//! Closed form: P(S_T < K) = N((ln(K/S0) - (mu - sigma^2/2) * T) / (sigma * sqrt(T)))

use crate::market::MarketParams;

/// GBM step and closed-form probabilities
#[derive(Debug, Clone, Copy)]
pub struct GbmModel {
    params: MarketParams,
}

impl GbmModel {
    /// Create a model for the given parameters
    pub fn new(params: MarketParams) -> Self {
        Self { params }
    }

    /// Advance `value` by one period of length `dt` years with shock `z`
    #[inline]
    pub fn step(&self, value: f64, dt: f64, z: f64) -> f64 {
        let MarketParams { drift, volatility } = self.params;
        let exponent = (drift - 0.5 * volatility * volatility) * dt + volatility * dt.sqrt() * z;
        value * exponent.exp()
    }

    /// Median terminal value after `years`
    pub fn median(&self, start: f64, years: f64) -> f64 {
        let MarketParams { drift, volatility } = self.params;
        start * ((drift - 0.5 * volatility * volatility) * years).exp()
    }

    /// Probability the terminal value after `years` is strictly below `threshold`
    pub fn prob_below(&self, start: f64, threshold: f64, years: f64) -> f64 {
        if start <= 0.0 || threshold <= 0.0 {
            return if threshold > start { 1.0 } else { 0.0 };
        }

        let sigma = self.params.volatility;
        if years <= 0.0 || sigma == 0.0 {
            // Deterministic drift
            return if self.median(start, years.max(0.0)) < threshold {
                1.0
            } else {
                0.0
            };
        }

        let d = ((threshold / start).ln()
            - (self.params.drift - 0.5 * sigma * sigma) * years)
            / (sigma * years.sqrt());
        normal_cdf(d)
    }
}

/// Standard normal CDF approximation (Abramowitz and Stegun)
pub fn normal_cdf(x: f64) -> f64 {
    let a1 = 0.254829592;
    let a2 = -0.284496736;
    let a3 = 1.421413741;
    let a4 = -1.453152027;
    let a5 = 1.061405429;
    let p = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs() / std::f64::consts::SQRT_2;

    let t = 1.0 / (1.0 + p * x);
    let y = 1.0 - (((((a5 * t + a4) * t) + a3) * t + a2) * t + a1) * t * (-x * x).exp();

    0.5 * (1.0 + sign * y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_vol_step_is_pure_drift() {
        let model = GbmModel::new(MarketParams::new(0.05, 0.0));
        let next = model.step(100.0, 1.0, 2.5);
        assert_relative_eq!(next, 100.0 * 0.05f64.exp(), epsilon = 1e-9);
    }

    #[test]
    fn test_positive_shock_raises_value() {
        let model = GbmModel::new(MarketParams::new(0.0, 0.2));
        assert!(model.step(100.0, 1.0 / 12.0, 1.0) > model.step(100.0, 1.0 / 12.0, -1.0));
    }

    #[test]
    fn test_prob_below_at_median() {
        let model = GbmModel::new(MarketParams::new(0.04, 0.1));
        let median = model.median(750_000.0, 5.0);
        let p = model.prob_below(750_000.0, median, 5.0);
        assert!((p - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_prob_below_monotone_in_threshold() {
        let model = GbmModel::new(MarketParams::new(0.04, 0.1));
        let low = model.prob_below(750_000.0, 700_000.0, 5.0);
        let high = model.prob_below(750_000.0, 900_000.0, 5.0);
        assert!(low < high);
    }

    #[test]
    fn test_prob_below_deterministic() {
        let model = GbmModel::new(MarketParams::new(0.03, 0.0));
        assert_eq!(model.prob_below(100.0, 110.0, 1.0), 1.0);
        assert_eq!(model.prob_below(100.0, 101.0, 1.0), 0.0);
    }

    #[test]
    fn test_normal_cdf() {
        assert!((normal_cdf(0.0) - 0.5).abs() < 1e-7);
        assert!((normal_cdf(1.96) - 0.975).abs() < 1e-3);
        assert!((normal_cdf(-1.96) - 0.025).abs() < 1e-3);
    }
}
