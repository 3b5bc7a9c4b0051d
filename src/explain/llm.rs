//! OpenAI-compatible chat-completions explainer

use super::{format_pct, format_usd, ExplainRequest, Explainer};
use crate::config::ExplainConfig;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SYSTEM_PROMPT: &str = "You help a first-time homebuyer understand the risk of an offer. \
Use only the numbers you are given and never invent data. Speak plainly and calmly.";

/// Explainer backed by a remote text-generation API
pub struct LlmExplainer {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

impl LlmExplainer {
    /// Create an explainer with an explicit key
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
        })
    }

    /// Create from ExplainConfig, reading the key from the configured env var
    pub fn from_config(config: &ExplainConfig) -> anyhow::Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .with_context(|| format!("{} is not set", config.api_key_env))?;
        Self::new(
            &config.endpoint,
            &config.model,
            api_key,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// User message listing the numbers to explain
    pub fn prompt(req: &ExplainRequest) -> String {
        format!(
            "Analysis results for a home this buyer is considering:\n\
             - Confidence score: {confidence}\n\
             - Chance the home ends up worth less than the offer: {underwater}\n\
             - Projected value, pessimistic (P10): {p10}\n\
             - Projected value, median (P50): {p50}\n\
             - Projected value, optimistic (P90): {p90}\n\
             - Offer price: {offer}\n\
             - Fair value range: {low} to {high}\n\
             - Fragility index: {fragility}\n\
             - Buyer's risk tolerance: {risk}\n\n\
             Reply with one sentence of overall assessment, three short bullet points \
             on what the numbers mean, and one actionable suggestion. No jargon.",
            confidence = format_pct(req.confidence_score),
            underwater = format_pct(req.prob_underwater()),
            p10 = format_usd(req.p10),
            p50 = format_usd(req.p50),
            p90 = format_usd(req.p90),
            offer = format_usd(req.offer_price),
            low = format_usd(req.fair_value_low),
            high = format_usd(req.fair_value_high),
            fragility = req.fragility_index,
            risk = req.risk_label(),
        )
    }
}

#[async_trait]
impl Explainer for LlmExplainer {
    async fn explain(&self, request: &ExplainRequest) -> anyhow::Result<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: Self::prompt(request),
                },
            ],
            temperature: 0.4,
        };

        tracing::debug!(endpoint = %self.endpoint, model = %self.model, "Requesting explanation");

        let response: ChatResponse = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .context("Empty completion")
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}
