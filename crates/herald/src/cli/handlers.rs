//! Command handlers.

use herald_bot::{
    HeraldConfig, HeraldServer, TriggerResponse, build_http_client, build_pipeline, build_store,
};
use herald_core::default_pillars;
use herald_error::HeraldResult;
use herald_storage::load_pillars;
use tracing::{info, warn};

/// Handle the `serve` command
pub async fn serve(config: HeraldConfig) -> HeraldResult<()> {
    let pipeline = build_pipeline(&config)?;
    let server = HeraldServer::new(config, pipeline);

    info!("Herald starting. Press Ctrl+C to stop.");
    server.start().await
}

/// Handle the `run-once` command
pub async fn run_once(config: &HeraldConfig) -> HeraldResult<()> {
    let pipeline = build_pipeline(config)?;
    let report = pipeline.run_scheduled().await;
    report.result.map(|_| ())
}

/// Handle the `post` command, printing the trigger response as JSON
pub async fn post_once(config: &HeraldConfig, pillar: &str, post_type: &str) -> HeraldResult<()> {
    let pipeline = build_pipeline(config)?;
    let (response, result) = match pipeline.run_on_demand(pillar, post_type).await {
        Ok(outcome) => (TriggerResponse::published(outcome), Ok(())),
        Err(e) => (TriggerResponse::failed(e.message()), Err(e)),
    };

    match serde_json::to_string_pretty(&response) {
        Ok(json) => println!("{}", json),
        Err(e) => warn!(error = %e, "Failed to render response"),
    }
    result
}

/// Handle the `pillars` command
pub async fn list_pillars(config: &HeraldConfig) -> HeraldResult<()> {
    let client = build_http_client(&config.http)?;
    let store = build_store(config, &client)?;

    let (pillars, source) = match load_pillars(store.as_ref(), &config.store.key).await? {
        Some(pillars) if !pillars.is_empty() => (pillars, store.backend_name()),
        _ => (default_pillars(), "fallback"),
    };

    println!("Pillars ({}):", source);
    for pillar in pillars {
        match pillar.category_tag {
            Some(tag) => println!("  {} [flair {}]", pillar.name, tag),
            None => println!("  {}", pillar.name),
        }
    }
    Ok(())
}

/// Handle the `check-config` command
pub fn check_config(config: &HeraldConfig) -> HeraldResult<()> {
    config.validate()?;
    println!("{:#?}", config);
    println!("Schedule: {}", config.schedule.schedule_type());
    println!("Configuration OK");
    Ok(())
}
