use clap::Parser;
use homeconfidence::cli::{Cli, Commands};
use homeconfidence::config::Config;
use homeconfidence::engine::Analyzer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        Config::default()
    });

    // Initialize telemetry
    let _telemetry = homeconfidence::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Serve(args) => {
            tracing::info!("Starting HTTP API");
            args.execute(&config).await?;
        }
        Commands::Analyze(args) => {
            args.execute(&config).await?;
        }
        Commands::Zips => {
            let analyzer = Analyzer::from_config(&config)?;
            let zips = analyzer.zips();
            println!("{} ZIPs with market history", zips.len());
            for zip in zips {
                println!("  {}", zip);
            }
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
