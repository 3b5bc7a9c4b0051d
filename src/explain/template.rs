//! Deterministic template explanations

use super::{format_pct, format_usd, ExplainRequest, Explainer};
use crate::fragility::FragilityIndex;
use async_trait::async_trait;

/// Offline explainer built from fixed sentences
#[derive(Debug, Clone, Default)]
pub struct TemplateExplainer;

impl TemplateExplainer {
    /// Create a new template explainer
    pub fn new() -> Self {
        Self
    }

    /// Render the explanation text
    pub fn render(&self, req: &ExplainRequest) -> String {
        let assessment = match req.confidence_score {
            s if s >= 0.7 => "This offer looks well supported by the local market.",
            s if s >= 0.4 => "This offer is reasonable, but it carries some real risk.",
            _ => "This offer is on shaky ground given how the local market behaves.",
        };

        let fair_position = if req.offer_price > req.fair_value_high {
            format!(
                "Your offer of {} is above the fair value range of {} to {}.",
                format_usd(req.offer_price),
                format_usd(req.fair_value_low),
                format_usd(req.fair_value_high)
            )
        } else if req.offer_price < req.fair_value_low {
            format!(
                "Your offer of {} is below the fair value range of {} to {}.",
                format_usd(req.offer_price),
                format_usd(req.fair_value_low),
                format_usd(req.fair_value_high)
            )
        } else {
            format!(
                "Your offer of {} sits inside the fair value range of {} to {}.",
                format_usd(req.offer_price),
                format_usd(req.fair_value_low),
                format_usd(req.fair_value_high)
            )
        };

        let suggestion = match (req.fragility_index, req.risk_label()) {
            (FragilityIndex::High | FragilityIndex::VeryHigh, "Low") => {
                "Consider a lower offer or a longer time in the home to give prices room to recover."
            }
            (FragilityIndex::High | FragilityIndex::VeryHigh, _) => {
                "Make sure you could stay put through a downturn before committing at this price."
            }
            (_, _) if req.offer_price > req.fair_value_high => {
                "There may be room to negotiate closer to the top of the fair value range."
            }
            _ => "If the inspection checks out, this price is in line with the numbers.",
        };

        format!(
            "{assessment}\n\n\
             - In a typical outcome the home is worth about {p50}; a rough year could leave it near {p10}, a strong one near {p90}.\n\
             - There is a {under} chance the home ends up worth less than you paid. Overall risk is rated {fragility}.\n\
             - {fair_position}\n\n\
             Suggestion: {suggestion} (Your risk tolerance: {risk}.)",
            p50 = format_usd(req.p50),
            p10 = format_usd(req.p10),
            p90 = format_usd(req.p90),
            under = format_pct(req.prob_underwater()),
            fragility = req.fragility_index,
            risk = req.risk_label(),
        )
    }
}

#[async_trait]
impl Explainer for TemplateExplainer {
    async fn explain(&self, request: &ExplainRequest) -> anyhow::Result<String> {
        Ok(self.render(request))
    }

    fn name(&self) -> &'static str {
        "template"
    }
}
