//! Report assembly
//!
//! Composes aggregator, classifier, fair value and affordability outputs into
//! the single [`AnalysisResult`] returned to callers.

use crate::affordability::Affordability;
use crate::aggregate::OutcomeStats;
use crate::fair_value::FairValueBand;
use crate::fragility::FragilityIndex;
use crate::market::MarketDataSourceKind;
use serde::{Deserialize, Serialize};

/// Final analysis of one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// 0-1 confidence in the offer
    pub confidence_score: f64,
    /// Probability the final value is below the offer price
    pub prob_downside: f64,
    pub p10: f64,
    pub p50: f64,
    pub p90: f64,
    pub fair_value_low: f64,
    pub fair_value_high: f64,
    pub fragility_index: FragilityIndex,
    /// Same as `prob_downside`; the explain endpoint reads this name
    pub prob_underwater: f64,
    /// Annualized dispersion of simulated returns
    pub dispersion: f64,
    /// Provenance of the market parameters
    pub market_data: MarketDataSourceKind,
    pub affordability: Affordability,
    /// Root seed that reproduces this result
    pub seed: u64,
}

/// Everything the assembler composes
#[derive(Debug, Clone, Copy)]
pub struct ReportParts {
    pub stats: OutcomeStats,
    pub fragility: FragilityIndex,
    pub fair_value: FairValueBand,
    pub affordability: Affordability,
    pub market_data: MarketDataSourceKind,
    pub seed: u64,
}

/// Compose the parts into a result
pub fn assemble(parts: ReportParts) -> AnalysisResult {
    let ReportParts {
        stats,
        fragility,
        fair_value,
        affordability,
        market_data,
        seed,
    } = parts;

    AnalysisResult {
        confidence_score: stats.confidence_score,
        prob_downside: stats.prob_downside,
        p10: stats.p10,
        p50: stats.p50,
        p90: stats.p90,
        fair_value_low: fair_value.low,
        fair_value_high: fair_value.high,
        fragility_index: fragility,
        prob_underwater: stats.prob_downside,
        dispersion: stats.dispersion,
        market_data,
        affordability,
        seed,
    }
}

impl AnalysisResult {
    /// Format as table for CLI output
    pub fn format_table(&self) -> String {
        let source = match self.market_data {
            MarketDataSourceKind::Zip => "ZIP history",
            MarketDataSourceKind::NationalFallback => "national average (fallback)",
        };
        format!(
            r#"
══════════════════════════════════════════════════════
               OFFER ANALYSIS
══════════════════════════════════════════════════════

OUTLOOK
───────────────────────────────────────────────────────
Confidence:       {:.1}%
Downside Prob:    {:.1}%
Fragility:        {}
P10 / P50 / P90:  {:.0} / {:.0} / {:.0}
Fair Value:       {:.0} - {:.0}

AFFORDABILITY
───────────────────────────────────────────────────────
Annual Payment:   {:.0}
Debt-to-Income:   {:.1}%
Stress:           {:.2}

Market Data:      {}
Seed:             {}
══════════════════════════════════════════════════════
"#,
            self.confidence_score * 100.0,
            self.prob_downside * 100.0,
            self.fragility_index,
            self.p10,
            self.p50,
            self.p90,
            self.fair_value_low,
            self.fair_value_high,
            self.affordability.annual_payment,
            self.affordability.debt_to_income * 100.0,
            self.affordability.stress,
            source,
            self.seed,
        )
    }
}
