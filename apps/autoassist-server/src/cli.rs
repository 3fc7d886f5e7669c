//! Command-line argument parsing

use clap::Parser;
use std::path::PathBuf;

use autoassist_core::AppConfig;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "autoassist-server",
    about = "AutoAssist NLU Server",
    version,
    long_about = "HTTP service that analyses customer utterances for an auto service desk: \
                  entities, customer name, sentiment, intent and a suggested reply."
)]
pub struct Args {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "CONFIG_PATH",
        default_value = "config/autoassist.yaml"
    )]
    pub config: PathBuf,

    /// HTTP server port (overrides the configuration file)
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// CoreNLP server URL (overrides the configuration file)
    #[arg(long, env = "ANNOTATOR_URL")]
    pub annotator_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        env = "LOG_LEVEL",
        value_parser = ["trace", "debug", "info", "warn", "error"]
    )]
    pub log_level: Option<String>,

    /// Enable JSON log format (useful for production)
    #[arg(long, env = "JSON_LOGS")]
    pub json_logs: bool,
}

impl Args {
    /// Applies command-line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(url) = &self.annotator_url {
            config.annotator.url = url.clone();
        }
        if let Some(level) = &self.log_level {
            config.telemetry.log_level = level.clone();
        }
        if self.json_logs {
            config.telemetry.json_logs = true;
        }
    }
}
