//! CLI interface for homeconfidence
//!
//! Provides subcommands for:
//! - `serve`: Run the HTTP API
//! - `analyze`: Analyze one offer from the command line
//! - `zips`: List ZIPs with market history
//! - `config`: Show the effective configuration

mod analyze;
mod serve;

pub use analyze::AnalyzeArgs;
pub use serve::ServeArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "homeconfidence")]
#[command(about = "Monte Carlo home-price simulation and offer confidence scoring")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API
    Serve(ServeArgs),
    /// Analyze one offer
    Analyze(AnalyzeArgs),
    /// List ZIPs with market history
    Zips,
    /// Show the effective configuration
    Config,
}
