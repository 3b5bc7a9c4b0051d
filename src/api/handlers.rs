//! Route handlers

use super::{ApiError, AppState};
use crate::explain::{ExplainRequest, ExplainResponse};
use crate::report::AnalysisResult;
use crate::request::AnalysisRequest;
use crate::telemetry::{record_latency, LatencyMetric};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use std::time::Instant;

pub(super) async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub(super) async fn not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "Not found")
}

pub(super) async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(request) = payload.map_err(rejection)?;
    let result = state.analyzer.clone().analyze_async(request).await?;
    Ok(Json(result))
}

pub(super) async fn explain(
    State(state): State<AppState>,
    payload: Result<Json<ExplainRequest>, JsonRejection>,
) -> Result<Json<ExplainResponse>, ApiError> {
    let Json(request) = payload.map_err(rejection)?;

    let started = Instant::now();
    let explanation = state.explainer.explain(&request).await.map_err(|e| {
        tracing::error!(provider = state.explainer.name(), error = %e, "Explanation failed");
        ApiError::new(StatusCode::BAD_GATEWAY, format!("LLM error: {}", e))
    })?;
    record_latency(LatencyMetric::Explain, started.elapsed());

    Ok(Json(ExplainResponse { explanation }))
}

fn rejection(err: JsonRejection) -> ApiError {
    ApiError::new(err.status(), err.body_text())
}
