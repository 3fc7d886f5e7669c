//! Telemetry initialization (logging and tracing)

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use autoassist_core::TelemetryConfig;

/// Initialize the logging stack. `RUST_LOG` wins over the configured level.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("Failed to create environment filter")?;

    if config.json_logs {
        // JSON formatting for production
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_target(true))
            .try_init()
            .context("Failed to install tracing subscriber")?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true),
            )
            .try_init()
            .context("Failed to install tracing subscriber")?;
    }

    Ok(())
}
