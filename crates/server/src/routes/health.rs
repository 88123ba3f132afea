use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use std::time::SystemTime;

/// Global server start time for uptime calculation
static SERVER_START_TIME: once_cell::sync::Lazy<SystemTime> =
    once_cell::sync::Lazy::new(SystemTime::now);

fn uptime_seconds() -> u64 {
    SERVER_START_TIME
        .elapsed()
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Health check endpoint (liveness)
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "docdrift-server",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": uptime_seconds(),
    }))
}

/// Readiness check endpoint
pub async fn readiness_check(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<impl IntoResponse> {
    let config = state.pipeline.config();

    Ok(Json(serde_json::json!({
        "status": "ready",
        "service": "docdrift-server",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": uptime_seconds(),
        "components": {
            "api": "ready",
            "embedder": config.semantic.model_name,
        }
    })))
}

/// Prometheus metrics endpoint
pub async fn metrics(State(state): State<Arc<ServerState>>) -> ServerResult<impl IntoResponse> {
    match &state.metrics_handle {
        Some(handle) if state.config.metrics_enabled => Ok((
            [(CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )),
        _ => Err(ServerError::NotFound),
    }
}

/// Pipeline status response
#[derive(Debug, Serialize)]
pub struct PipelineStatusResponse {
    pub status: &'static str,
    pub config_version: String,
    pub split_version: u32,
    pub embedder: EmbedderStatus,
    pub thresholds: matcher::ClassifyThresholds,
}

#[derive(Debug, Serialize)]
pub struct EmbedderStatus {
    pub model_name: String,
    pub dimension: usize,
}

/// Active pipeline settings (authenticated)
pub async fn pipeline_status(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<impl IntoResponse> {
    let config = state.pipeline.config();
    Ok(Json(PipelineStatusResponse {
        status: "ready",
        config_version: config.version.clone(),
        split_version: config.canonical.version,
        embedder: EmbedderStatus {
            model_name: config.semantic.model_name.clone(),
            dimension: config.semantic.dimension,
        },
        thresholds: config.matcher.thresholds,
    }))
}
