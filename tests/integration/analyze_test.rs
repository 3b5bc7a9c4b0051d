//! End-to-end analysis properties

use crate::common::{analyzer, analyzer_with, irvine_request};
use approx::assert_relative_eq;
use homeconfidence::config::Config;
use homeconfidence::error::{AnalysisError, ErrorClass};
use homeconfidence::fragility::FragilityIndex;
use homeconfidence::market::MarketDataSourceKind;
use homeconfidence::request::AnalysisRequest;
use homeconfidence::simulation::MonteCarloSimulator;

fn flat_request(offer_price: f64) -> AnalysisRequest {
    AnalysisRequest {
        zip: "99501".to_string(),
        current_price: 350_000.0,
        offer_price,
        horizon_years: 3,
        ..irvine_request(Some(11))
    }
}

#[test]
fn test_irvine_example_is_reproducible() {
    let analyzer = analyzer();
    let first = analyzer.analyze(&irvine_request(Some(42))).unwrap();
    let second = analyzer.analyze(&irvine_request(Some(42))).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.seed, 42);
    assert_eq!(first.market_data, MarketDataSourceKind::Zip);
}

#[test]
fn test_result_bounds_hold() {
    let analyzer = analyzer();
    for seed in 0..5 {
        for zip in ["92602", "78701", "99501", "02108", "30301"] {
            let request = AnalysisRequest {
                zip: zip.to_string(),
                ..irvine_request(Some(seed))
            };
            let result = analyzer.analyze(&request).unwrap();

            assert!(result.p10 <= result.p50 && result.p50 <= result.p90);
            assert!((0.0..=1.0).contains(&result.confidence_score));
            assert!((0.0..=1.0).contains(&result.prob_downside));
            assert!(result.fair_value_low >= 0.0);
            assert!(result.fair_value_low <= result.fair_value_high);
            assert_eq!(result.prob_underwater, result.prob_downside);
        }
    }
}

#[test]
fn test_parallel_matches_sequential() {
    let config = Config::default();
    let parallel = analyzer_with(&config)
        .with_simulator(MonteCarloSimulator::new(500, 12).with_parallel(true));
    let sequential = analyzer_with(&config)
        .with_simulator(MonteCarloSimulator::new(500, 12).with_parallel(false));

    let request = irvine_request(Some(2024));
    let a = parallel.analyze(&request).unwrap();
    let b = sequential.analyze(&request).unwrap();

    assert_eq!((a.p10, a.p50, a.p90), (b.p10, b.p50, b.p90));
    assert_eq!(a.prob_downside, b.prob_downside);
}

#[test]
fn test_higher_offer_never_lowers_downside() {
    let analyzer = analyzer();
    let mut previous = 0.0;
    for offer in [600_000.0, 700_000.0, 750_000.0, 800_000.0, 900_000.0, 1_100_000.0] {
        let request = AnalysisRequest {
            offer_price: offer,
            ..irvine_request(Some(5))
        };
        let result = analyzer.analyze(&request).unwrap();
        assert!(result.prob_downside >= previous);
        previous = result.prob_downside;
    }
}

#[test]
fn test_zero_volatility_one_year_follows_drift() {
    let request = AnalysisRequest {
        zip: "78701".to_string(),
        current_price: 600_000.0,
        offer_price: 600_000.0,
        horizon_years: 1,
        ..irvine_request(Some(3))
    };
    let result = analyzer().analyze(&request).unwrap();

    let expected = 600_000.0 * (12.0 * 1.005f64.ln()).exp();
    assert_relative_eq!(result.p10, expected, max_relative = 1e-9);
    assert_relative_eq!(result.p50, expected, max_relative = 1e-9);
    assert_relative_eq!(result.p90, expected, max_relative = 1e-9);
    assert_eq!(result.prob_downside, 0.0);
}

#[test]
fn test_certain_gain_scores_full_confidence() {
    let result = analyzer().analyze(&flat_request(300_000.0)).unwrap();

    assert_eq!(result.prob_downside, 0.0);
    assert_eq!(result.dispersion, 0.0);
    assert_eq!(result.confidence_score, 1.0);
    assert_eq!(result.fragility_index, FragilityIndex::Low);
}

#[test]
fn test_certain_loss_scores_zero_confidence() {
    let result = analyzer().analyze(&flat_request(400_000.0)).unwrap();

    assert_eq!(result.prob_downside, 1.0);
    assert_eq!(result.confidence_score, 0.0);
    assert_eq!(result.fragility_index, FragilityIndex::VeryHigh);
}

#[test]
fn test_unknown_zip_flagged_as_fallback() {
    let analyzer = analyzer();
    let request = AnalysisRequest {
        zip: "30301".to_string(),
        ..irvine_request(Some(9))
    };
    let result = analyzer.analyze(&request).unwrap();

    assert_eq!(result.market_data, MarketDataSourceKind::NationalFallback);
    assert!(result.confidence_score <= 0.85);
}

#[test]
fn test_short_history_falls_back() {
    let request = AnalysisRequest {
        zip: "02108".to_string(),
        ..irvine_request(Some(9))
    };
    let result = analyzer().analyze(&request).unwrap();
    assert_eq!(result.market_data, MarketDataSourceKind::NationalFallback);
}

#[test]
fn test_zip_plus_four_matches_five_digit() {
    let analyzer = analyzer();
    let plain = analyzer.analyze(&irvine_request(Some(1))).unwrap();
    let extended = analyzer
        .analyze(&AnalysisRequest {
            zip: "92602-1234".to_string(),
            ..irvine_request(Some(1))
        })
        .unwrap();
    assert_eq!(plain, extended);
}

#[test]
fn test_valid_requests_never_degenerate() {
    let analyzer = analyzer();
    for horizon_years in [1, 2, 10, 30] {
        let request = AnalysisRequest {
            horizon_years,
            ..irvine_request(Some(17))
        };
        match analyzer.analyze(&request) {
            Ok(_) => {}
            Err(e) => panic!("horizon {horizon_years} failed: {e}"),
        }
    }
}

#[test]
fn test_invalid_requests_rejected() {
    let analyzer = analyzer();
    let cases = [
        AnalysisRequest {
            zip: "abc".to_string(),
            ..irvine_request(None)
        },
        AnalysisRequest {
            offer_price: 0.0,
            ..irvine_request(None)
        },
        AnalysisRequest {
            horizon_years: 0,
            ..irvine_request(None)
        },
        AnalysisRequest {
            risk_tolerance: 1.5,
            ..irvine_request(None)
        },
        AnalysisRequest {
            current_price: f64::NAN,
            ..irvine_request(None)
        },
    ];

    for request in cases {
        let err = analyzer.analyze(&request).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidRequest(_)), "{err}");
        assert_eq!(err.class(), ErrorClass::Client);
    }
}

#[test]
fn test_past_deadline_times_out() {
    let err = analyzer()
        .analyze_until(&irvine_request(Some(1)), Some(std::time::Instant::now()))
        .unwrap_err();
    assert_eq!(err.class(), ErrorClass::Retryable);
}

#[test]
fn test_affordability_reported() {
    let result = analyzer().analyze(&irvine_request(Some(42))).unwrap();
    assert!(result.affordability.annual_payment > 0.0);
    assert!(result.affordability.debt_to_income > 0.0);
    assert!((0.0..=1.0).contains(&result.affordability.stress));
}

#[test]
fn test_extreme_price_keeps_paths_alive() {
    let request = AnalysisRequest {
        current_price: 1e12,
        offer_price: 1e12,
        ..irvine_request(Some(4))
    };
    let result = analyzer().analyze(&request).unwrap();

    assert!(result.p10 > 0.0);
    assert!(result.p50 > 0.0);
    assert!(result.dispersion > 0.0);
    assert!(result.prob_downside < 1.0);
}
