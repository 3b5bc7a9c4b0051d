//! Market data loading tests

use crate::common::irvine_request;
use homeconfidence::config::Config;
use homeconfidence::engine::Analyzer;
use homeconfidence::market::{MarketDataSource, MarketDataSourceKind, ZhviDataset};
use homeconfidence::request::AnalysisRequest;
use std::io::Write;

fn sample_config() -> Config {
    toml::from_str(include_str!("../../config.toml.example")).unwrap()
}

#[test]
fn test_sample_dataset_loads() {
    let dataset = ZhviDataset::load("data/zhvi_sample.csv").unwrap();
    let zips = dataset.zips();

    assert_eq!(zips.len(), 5);
    assert!(zips.contains(&"92602".to_string()));
    // Integer-typed RegionName loses the leading zero
    assert!(zips.contains(&"02108".to_string()));
    assert_eq!(dataset.series("92602").unwrap().values.len(), 60);
}

#[test]
fn test_analyzer_from_example_config() {
    let analyzer = Analyzer::from_config(&sample_config()).unwrap();
    assert_eq!(analyzer.paths(), 1_000);

    let result = analyzer.analyze(&irvine_request(Some(42))).unwrap();
    assert_eq!(result.market_data, MarketDataSourceKind::Zip);
    assert_eq!(result, analyzer.analyze(&irvine_request(Some(42))).unwrap());
}

#[test]
fn test_sparse_zip_in_sample_falls_back() {
    let analyzer = Analyzer::from_config(&sample_config()).unwrap();
    let request = AnalysisRequest {
        zip: "99501".to_string(),
        ..irvine_request(Some(42))
    };
    let result = analyzer.analyze(&request).unwrap();
    assert_eq!(result.market_data, MarketDataSourceKind::NationalFallback);
}

#[test]
fn test_missing_data_file_is_an_error() {
    let mut config = Config::default();
    config.market.data_path = Some("does/not/exist.csv".into());
    assert!(Analyzer::from_config(&config).is_err());
}

#[test]
fn test_csv_with_unordered_columns() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "RegionName,City,2020-03-31,2020-01-31,2020-02-29").unwrap();
    writeln!(file, "501,Holtsville,103.0,101.0,102.0").unwrap();
    file.flush().unwrap();

    let dataset = ZhviDataset::load(file.path()).unwrap();
    let series = dataset.series("00501").unwrap();
    assert_eq!(series.values, vec![101.0, 102.0, 103.0]);
}
