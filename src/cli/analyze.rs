//! Analyze command implementation

use crate::config::Config;
use crate::engine::Analyzer;
use crate::request::AnalysisRequest;
use anyhow::Context;
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;

/// Output format for analysis results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// JSON file holding a full analysis request (overrides the flags below)
    #[arg(long)]
    pub request: Option<PathBuf>,

    /// ZIP code
    #[arg(long)]
    pub zip: Option<String>,

    /// Current market value
    #[arg(long)]
    pub current_price: Option<f64>,

    /// Offer price
    #[arg(long)]
    pub offer_price: Option<f64>,

    /// Down payment fraction
    #[arg(long, default_value = "0.2")]
    pub down_payment_pct: f64,

    /// Annual income
    #[arg(long)]
    pub income: Option<f64>,

    /// Years to project
    #[arg(long, default_value = "5")]
    pub horizon_years: u32,

    /// Risk tolerance (0-1)
    #[arg(long, default_value = "0.5")]
    pub risk_tolerance: f64,

    /// Root seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl AnalyzeArgs {
    /// Build the request from a file or from flags
    pub fn to_request(&self) -> anyhow::Result<AnalysisRequest> {
        if let Some(path) = &self.request {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let mut request: AnalysisRequest = serde_json::from_str(&content)
                .with_context(|| format!("Invalid request JSON in {}", path.display()))?;
            if self.seed.is_some() {
                request.seed = self.seed;
            }
            return Ok(request);
        }

        Ok(AnalysisRequest {
            zip: self.zip.clone().context("--zip is required")?,
            current_price: self.current_price.context("--current-price is required")?,
            offer_price: self.offer_price.context("--offer-price is required")?,
            down_payment_pct: self.down_payment_pct,
            income: self.income.context("--income is required")?,
            horizon_years: self.horizon_years,
            risk_tolerance: self.risk_tolerance,
            home_features: None,
            seed: self.seed,
        })
    }

    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let request = self.to_request()?;
        let analyzer = Arc::new(Analyzer::from_config(config)?);

        tracing::info!(zip = %request.zip, paths = analyzer.paths(), "Running analysis");
        let result = analyzer.analyze_async(request).await?;

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
            OutputFormat::Table => println!("{}", result.format_table()),
        }
        Ok(())
    }
}
