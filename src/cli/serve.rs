//! Serve command implementation

use crate::api::{self, AppState};
use crate::config::Config;
use crate::engine::Analyzer;
use crate::explain::build_explainer;
use clap::Args;
use std::sync::Arc;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Override the configured bind address
    #[arg(short, long)]
    pub bind: Option<String>,
}

impl ServeArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let analyzer = Arc::new(Analyzer::from_config(config)?);
        let explainer = build_explainer(&config.explain)?;
        tracing::info!(explainer = explainer.name(), "Explanation provider ready");

        let bind = self.bind.as_deref().unwrap_or(&config.server.bind);
        api::serve(bind, AppState::new(analyzer, explainer)).await
    }
}
