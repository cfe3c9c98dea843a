//! Herald CLI binary.
//!
//! This binary drives the posting pipeline:
//! - Serve the HTTP trigger API with the internal scheduler
//! - Run a single scheduled or on-demand post
//! - Inspect the pillar list and configuration

use clap::Parser;
use herald_bot::HeraldConfig;

mod cli;
mod observability;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, check_config, list_pillars, post_once, run_once, serve};

    // Load .env before clap reads `env` defaults
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = HeraldConfig::load(cli.config.as_deref())?;

    let log_level = if cli.verbose {
        "debug".to_string()
    } else {
        config.log.level.clone()
    };
    observability::init_observability_with_config(
        observability::ObservabilityConfig::new(env!("CARGO_PKG_NAME"))
            .with_log_level(log_level)
            .with_json_logs(cli.json_logs || config.log.json),
    )?;

    let result = match cli.command {
        Commands::Serve => serve(config).await,
        Commands::RunOnce => run_once(&config).await,
        Commands::Post { pillar, post_type } => post_once(&config, &pillar, &post_type).await,
        Commands::Pillars => list_pillars(&config).await,
        Commands::CheckConfig => check_config(&config),
    };

    observability::shutdown_observability();
    result?;
    Ok(())
}
