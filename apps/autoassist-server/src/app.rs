//! Application state and initialization

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

use autoassist_core::AppConfig;
use autoassist_nlp::{Analyzer, CoreNlpClient, NluEngine};

use crate::server::Server;

/// Shared application state
#[derive(Clone, Debug)]
pub struct AppState {
    /// The NLU engine
    pub engine: Arc<NluEngine>,
}

impl AppState {
    pub fn new(engine: NluEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Create the application state from configuration
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        info!("Initializing application components");

        let analyzer =
            Analyzer::from_config(&config.nlp).context("Failed to load response templates")?;
        let annotator =
            CoreNlpClient::new(&config.annotator).context("Failed to create CoreNLP client")?;

        info!("Annotation server: {}", annotator.base_url());
        let engine = NluEngine::initialize(Arc::new(annotator), analyzer).await;
        if !engine.is_ready() {
            warn!("Serving without a ready annotation engine; analysis requests will return 503");
        }

        Ok(Self::new(engine))
    }
}

/// Main application
pub struct App {
    config: AppConfig,
    state: AppState,
}

impl App {
    /// Build the application with all dependencies
    pub async fn build(config: AppConfig) -> Result<Self> {
        let state = AppState::from_config(&config).await?;
        Ok(Self { config, state })
    }

    /// Run the application
    pub async fn run(self) -> Result<()> {
        info!("Starting server");
        info!("HTTP address: {}", self.config.server.address());

        let server = Server::new(self.config.server, self.state);
        server.run().await
    }
}
