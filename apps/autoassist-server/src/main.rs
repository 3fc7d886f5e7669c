mod api;
mod app;
mod cli;
mod server;
mod telemetry;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use autoassist_core::AppConfig;

use crate::app::App;
use crate::cli::Args;
use crate::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    let args = Args::parse();

    let mut config = AppConfig::load_from_file(&args.config)
        .with_context(|| format!("Failed to load configuration from {}", args.config.display()))?;
    args.apply(&mut config);

    init_telemetry(&config.telemetry)?;

    info!("Starting AutoAssist NLU Server");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let result = run_application(config).await;

    if let Err(ref e) = result {
        error!("Application error: {:#}", e);
    }

    info!("Server shutdown complete");

    result
}

async fn run_application(config: AppConfig) -> Result<()> {
    let app = App::build(config).await?;
    app.run().await?;

    Ok(())
}
