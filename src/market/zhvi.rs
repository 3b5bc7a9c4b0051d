//! ZHVI-format CSV loader
//!
//! One row per ZIP: a `RegionName` column holding the ZIP (possibly stored as
//! an integer, so leading zeros may be lost) and one column per month named
//! `YYYY-MM-DD`. Other columns are ignored. Blank cells are skipped.

use super::{MarketDataSource, ZipSeries};
use crate::error::{AnalysisError, Result};
use anyhow::Context;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

const REGION_COLUMN: &str = "RegionName";

/// In-memory ZIP-level home value index
#[derive(Debug, Clone, Default)]
pub struct ZhviDataset {
    series: HashMap<String, Vec<f64>>,
}

impl ZhviDataset {
    /// Load a dataset from a CSV file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open ZHVI data at {}", path.display()))?;
        let dataset = Self::from_reader(file)
            .with_context(|| format!("Failed to parse ZHVI data at {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            zips = dataset.len(),
            "Loaded ZHVI dataset"
        );
        Ok(dataset)
    }

    /// Parse a dataset from any CSV reader
    pub fn from_reader<R: Read>(reader: R) -> anyhow::Result<Self> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv.headers()?.clone();
        let region_idx = headers
            .iter()
            .position(|h| h.trim() == REGION_COLUMN)
            .with_context(|| format!("Missing {} column", REGION_COLUMN))?;

        let mut date_columns: Vec<(NaiveDate, usize)> = headers
            .iter()
            .enumerate()
            .filter_map(|(idx, h)| {
                NaiveDate::parse_from_str(h.trim(), "%Y-%m-%d")
                    .ok()
                    .map(|date| (date, idx))
            })
            .collect();
        date_columns.sort_by_key(|(date, _)| *date);

        if date_columns.is_empty() {
            anyhow::bail!("No monthly date columns found");
        }

        let mut series = HashMap::new();
        for record in csv.records() {
            let record = record?;
            let Some(zip) = record.get(region_idx).and_then(pad_zip) else {
                continue;
            };

            let values: Vec<f64> = date_columns
                .iter()
                .filter_map(|(_, idx)| record.get(*idx))
                .filter_map(|cell| cell.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite())
                .collect();

            series.insert(zip, values);
        }

        Ok(Self { series })
    }

    /// Build a dataset from explicit series (oldest value first)
    pub fn from_series<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        Self {
            series: entries
                .into_iter()
                .map(|(zip, values)| (zip.into(), values))
                .collect(),
        }
    }

    /// Number of ZIPs loaded
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether the dataset has no ZIPs
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl MarketDataSource for ZhviDataset {
    fn series(&self, zip: &str) -> Result<ZipSeries> {
        self.series
            .get(zip)
            .map(|values| ZipSeries {
                zip: zip.to_string(),
                values: values.clone(),
            })
            .ok_or_else(|| AnalysisError::MarketDataUnavailable {
                zip: zip.to_string(),
                reason: "ZIP not found in index data".to_string(),
            })
    }

    fn zips(&self) -> Vec<String> {
        let mut zips: Vec<String> = self.series.keys().cloned().collect();
        zips.sort();
        zips
    }
}

/// Restore leading zeros lost by integer-typed CSV columns
fn pad_zip(raw: &str) -> Option<String> {
    let raw = raw.trim();
    // Tolerate "2108.0" style floats from spreadsheet exports
    let raw = raw.strip_suffix(".0").unwrap_or(raw);
    if raw.is_empty() || raw.len() > 5 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(format!("{:0>5}", raw))
}
