//! Shared fixtures

use homeconfidence::config::Config;
use homeconfidence::engine::Analyzer;
use homeconfidence::market::ZhviDataset;
use homeconfidence::request::AnalysisRequest;
use std::sync::Arc;

/// The Irvine example request
pub fn irvine_request(seed: Option<u64>) -> AnalysisRequest {
    AnalysisRequest {
        zip: "92602".to_string(),
        current_price: 750_000.0,
        offer_price: 770_000.0,
        down_payment_pct: 0.2,
        income: 120_000.0,
        horizon_years: 5,
        risk_tolerance: 0.5,
        home_features: None,
        seed,
    }
}

/// Five years of noisy upward monthly history
pub fn noisy_series(start: f64) -> Vec<f64> {
    let mut value = start;
    (0..60)
        .map(|i| {
            let wobble = match i % 4 {
                0 => 0.012,
                1 => -0.006,
                2 => 0.009,
                _ => -0.003,
            };
            value *= 1.0 + wobble;
            value
        })
        .collect()
}

/// Two years of history growing by the same factor every month
pub fn steady_series(start: f64, monthly_growth: f64) -> Vec<f64> {
    let mut value = start;
    (0..24)
        .map(|_| {
            let current = value;
            value *= monthly_growth;
            current
        })
        .collect()
}

pub fn dataset() -> ZhviDataset {
    ZhviDataset::from_series(vec![
        ("92602", noisy_series(740_000.0)),
        ("78701", steady_series(500_000.0, 1.005)),
        ("99501", vec![350_000.0; 24]),
        ("02108", noisy_series(900_000.0)[..6].to_vec()),
    ])
}

pub fn analyzer_with(config: &Config) -> Analyzer {
    Analyzer::new(Arc::new(dataset()), config)
}

pub fn analyzer() -> Analyzer {
    analyzer_with(&Config::default())
}
