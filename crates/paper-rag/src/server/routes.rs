//! HTTP routes for the web UI.
//!
//! - `GET /`: the page (input, button, three output regions)
//! - `POST /api/run`: run the pipeline for `{"query": ...}`
//! - `GET /health`: liveness

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

use crate::error::PipelineError;
use crate::formatters::render_markdown_html;
use crate::models::PipelineOutput;
use crate::pipeline::RagPipeline;

const INDEX_HTML: &str = include_str!("index.html");

/// Body of `POST /api/run`.
#[derive(Debug, Clone, Deserialize)]
pub struct RunRequest {
    /// Research topic typed by the user.
    pub query: String,
}

/// Response of `POST /api/run`: the three outputs, plus the Markdown rendered to HTML.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunResponse {
    /// Markdown output.
    pub output: String,
    /// `output` rendered to HTML.
    pub output_html: String,
    /// Retrieval accuracy text box.
    pub retrieval_accuracy: String,
    /// Summary quality text box.
    pub summary_quality: String,
}

impl From<PipelineOutput> for RunResponse {
    fn from(out: PipelineOutput) -> Self {
        Self {
            output_html: render_markdown_html(&out.output),
            output: out.output,
            retrieval_accuracy: out.retrieval_accuracy,
            summary_quality: out.summary_quality,
        }
    }
}

/// Shared state for HTTP handlers.
pub struct AppState {
    /// Pipeline run by `POST /api/run`.
    pipeline: RagPipeline,
    /// Held for the duration of a run so submissions never overlap.
    run_lock: Mutex<()>,
}

/// A failed run, reported as HTTP 500.
#[derive(Debug)]
pub struct ApiError(PipelineError);

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.0.to_user_message() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// Create the HTTP router.
pub fn create_router(pipeline: RagPipeline) -> Router {
    let state = Arc::new(AppState { pipeline, run_lock: Mutex::new(()) });

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/api/run", post(run_pipeline))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "paper-rag",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn run_pipeline(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RunRequest>,
) -> Result<Json<RunResponse>, ApiError> {
    let _guard = state.run_lock.lock().await;

    tracing::info!(query = %req.query, "Running pipeline");

    match state.pipeline.run(&req.query).await {
        Ok(out) => Ok(Json(out.into())),
        Err(e) => {
            tracing::error!(query = %req.query, error = %e, "Pipeline run failed");
            Err(e.into())
        }
    }
}
