//! HTTP Server implementation

use anyhow::{Context, Result};
use tracing::info;

use autoassist_core::ServerConfig;

use crate::api::create_router;
use crate::app::AppState;

pub struct Server {
    config: ServerConfig,
    state: AppState,
}

impl Server {
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    pub async fn run(self) -> Result<()> {
        let addr = self.config.address();
        let app = create_router(self.state);

        let listener = tokio::net::TcpListener::bind(addr.as_str())
            .await
            .with_context(|| format!("Failed to bind HTTP server to {addr}"))?;

        info!("HTTP server listening on {}", addr);

        axum::serve(listener, app.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server error")?;

        Ok(())
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
