//! NLP-specific error types

use thiserror::Error;

/// NLP-specific error types
#[derive(Error, Debug)]
pub enum NlpError {
    /// The annotation engine never came up; analysis must not proceed.
    #[error("NLP engine not ready: {0}")]
    NotReady(String),

    /// Null, empty or whitespace-only input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Annotation error: {0}")]
    Annotation(String),

    #[error("Annotation transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed annotation payload: {0}")]
    MalformedAnnotation(#[from] serde_json::Error),

    /// Raised by an analysis sub-component. Never leaves the analyzer.
    #[error("Component error: {0}")]
    Component(String),

    #[error("Template configuration error: {0}")]
    Templates(String),

    /// Failure outside the per-component safety nets, wrapping its cause.
    #[error("Analysis failed: {source}")]
    Pipeline {
        #[source]
        source: Box<NlpError>,
    },
}

impl NlpError {
    pub fn not_ready(msg: impl Into<String>) -> Self {
        Self::NotReady(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn annotation(msg: impl Into<String>) -> Self {
        Self::Annotation(msg.into())
    }

    pub fn component(msg: impl Into<String>) -> Self {
        Self::Component(msg.into())
    }

    pub fn templates(msg: impl Into<String>) -> Self {
        Self::Templates(msg.into())
    }

    pub fn pipeline(source: NlpError) -> Self {
        Self::Pipeline {
            source: Box::new(source),
        }
    }
}

/// Result type for NLP operations
pub type Result<T> = std::result::Result<T, NlpError>;

// Convert to autoassist_core AppError
impl From<NlpError> for autoassist_core::AppError {
    fn from(err: NlpError) -> Self {
        match err {
            NlpError::NotReady(msg) => autoassist_core::AppError::unavailable(msg),
            NlpError::InvalidInput(msg) => autoassist_core::AppError::validation(msg),
            NlpError::Templates(msg) => autoassist_core::AppError::config(msg),
            other => autoassist_core::AppError::internal(other.to_string()),
        }
    }
}
