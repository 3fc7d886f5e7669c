//! REST routes and handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::warn;

use autoassist_core::AppError;
use autoassist_nlp::{NlpError, NluResult};

use crate::app::AppState;

/// Body of `POST /api/nlp/analyze`
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Error body sent to clients
#[derive(Debug)]
pub struct ApiError(AppError);

impl From<NlpError> for ApiError {
    fn from(err: NlpError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.0.kind(),
            "message": self.0.to_string(),
        }));

        (status, body).into_response()
    }
}

/// Create the HTTP router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/api/nlp/status", get(nlp_status))
        .route("/api/nlp/analyze", post(analyze))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "service": "AutoAssist NLU",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

async fn nlp_status(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "initialized": state.engine.is_ready(),
        "status": state.engine.status().to_string(),
    }))
}

async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<NluResult>, ApiError> {
    let text = request.text.unwrap_or_default();
    let result = state.engine.analyze(&text).await.map_err(|e| {
        warn!("Analysis request failed: {}", e);
        ApiError::from(e)
    })?;
    Ok(Json(result))
}
