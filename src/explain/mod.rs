//! Plain-language explanations of analysis results
//!
//! Text generation is an external collaborator; this module only fixes the
//! input contract and offers a deterministic template alongside an
//! OpenAI-compatible client.

mod llm;
mod template;

pub use llm::LlmExplainer;
pub use template::TemplateExplainer;

use crate::config::{ExplainConfig, ExplainProvider};
use crate::fragility::FragilityIndex;
use crate::report::AnalysisResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// `/explain` request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainRequest {
    pub confidence_score: f64,
    pub prob_downside: f64,
    /// Defaults to `prob_downside` when omitted
    #[serde(default)]
    pub prob_underwater: Option<f64>,
    pub p10: f64,
    pub p50: f64,
    pub p90: f64,
    pub offer_price: f64,
    pub fair_value_low: f64,
    pub fair_value_high: f64,
    pub fragility_index: FragilityIndex,
    pub risk_tolerance: f64,
}

impl ExplainRequest {
    /// Build from a result and the inputs it was computed for
    pub fn from_result(result: &AnalysisResult, offer_price: f64, risk_tolerance: f64) -> Self {
        Self {
            confidence_score: result.confidence_score,
            prob_downside: result.prob_downside,
            prob_underwater: Some(result.prob_underwater),
            p10: result.p10,
            p50: result.p50,
            p90: result.p90,
            offer_price,
            fair_value_low: result.fair_value_low,
            fair_value_high: result.fair_value_high,
            fragility_index: result.fragility_index,
            risk_tolerance,
        }
    }

    /// Probability of ending below the offer
    pub fn prob_underwater(&self) -> f64 {
        self.prob_underwater.unwrap_or(self.prob_downside)
    }

    /// Human label for the buyer's risk tolerance
    pub fn risk_label(&self) -> &'static str {
        if self.risk_tolerance < 0.3 {
            "Low"
        } else if self.risk_tolerance < 0.6 {
            "Moderate"
        } else {
            "High"
        }
    }
}

/// `/explain` response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainResponse {
    pub explanation: String,
}

/// Trait for explanation generators
#[async_trait]
pub trait Explainer: Send + Sync {
    /// Generate an explanation for the given numbers
    async fn explain(&self, request: &ExplainRequest) -> anyhow::Result<String>;

    /// Provider name for logs
    fn name(&self) -> &'static str;
}

/// Build the configured explainer
pub fn build_explainer(config: &ExplainConfig) -> anyhow::Result<Arc<dyn Explainer>> {
    match config.provider {
        ExplainProvider::Template => Ok(Arc::new(TemplateExplainer::new())),
        ExplainProvider::OpenAi => Ok(Arc::new(LlmExplainer::from_config(config)?)),
    }
}

/// Format a dollar amount with thousands separators, rounded to whole dollars
pub fn format_usd(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Format a 0-1 fraction as a whole percentage
pub fn format_pct(value: f64) -> String {
    format!("{:.0}%", value * 100.0)
}
