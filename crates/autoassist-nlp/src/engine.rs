//! NLU engine implementation.
//!
//! This module ties the annotation engine to the [`Analyzer`]: it validates
//! input, annotates it, runs the pipeline and reports readiness.

use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, instrument, warn};

use crate::analyzer::{Analyzer, NluResult};
use crate::annotation::Annotator;
use crate::error::{NlpError, Result};

/// Whether the annotation engine came up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    Ready,
    NotInitialized,
}

impl EngineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ready => "Ready",
            Self::NotInitialized => "Not initialized",
        }
    }
}

impl fmt::Display for EngineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Analyses raw utterances end to end.
///
/// Cheap to share behind an `Arc`; every call works on its own data.
pub struct NluEngine {
    /// Annotation engine
    annotator: Arc<dyn Annotator>,
    /// Analysis pipeline
    analyzer: Analyzer,
    status: RwLock<EngineStatus>,
}

impl NluEngine {
    /// Probes the annotator and builds the engine. A failed probe leaves the
    /// engine not initialized; the annotator is probed again on each later
    /// analysis until it answers.
    pub async fn initialize(annotator: Arc<dyn Annotator>, analyzer: Analyzer) -> Self {
        info!("Initializing NLU engine");

        let status = match annotator.ready().await {
            Ok(()) => {
                info!("NLU engine ready");
                EngineStatus::Ready
            }
            Err(e) => {
                error!("Failed to initialize annotation engine: {}", e);
                EngineStatus::NotInitialized
            }
        };

        Self {
            annotator,
            analyzer,
            status: RwLock::new(status),
        }
    }

    pub fn status(&self) -> EngineStatus {
        *self.status.read()
    }

    pub fn is_ready(&self) -> bool {
        self.status() == EngineStatus::Ready
    }

    /// Re-probes a not-initialized annotator. Once ready, the engine stays ready.
    async fn ensure_ready(&self) -> bool {
        if self.is_ready() {
            return true;
        }

        match self.annotator.ready().await {
            Ok(()) => {
                info!("Annotation engine came up, NLU engine ready");
                *self.status.write() = EngineStatus::Ready;
                true
            }
            Err(e) => {
                warn!("Annotation engine still unavailable: {}", e);
                false
            }
        }
    }

    /// Annotates and analyses one utterance.
    ///
    /// # Errors
    ///
    /// * [`NlpError::NotReady`] when the annotator is still unavailable
    /// * [`NlpError::InvalidInput`] for empty or whitespace-only text
    /// * [`NlpError::Pipeline`] when annotation itself fails
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    pub async fn analyze(&self, text: &str) -> Result<NluResult> {
        if !self.ensure_ready().await {
            return Err(NlpError::not_ready("NLP service not initialized"));
        }

        let text = text.trim();
        if text.is_empty() {
            return Err(NlpError::invalid_input("Text cannot be empty"));
        }

        let started = Instant::now();
        let document = self.annotator.annotate(text).await.map_err(|e| {
            error!("Annotation failed: {}", e);
            NlpError::pipeline(e)
        })?;

        let mut result = self.analyzer.analyze(&document);
        result.processing_time = started.elapsed();

        info!(
            "Analysis complete: intent={}, sentiment={}, took {}ms",
            result.intent,
            result.sentiment,
            result.processing_time.as_millis()
        );

        Ok(result)
    }
}

impl fmt::Debug for NluEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NluEngine")
            .field("analyzer", &self.analyzer)
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}
