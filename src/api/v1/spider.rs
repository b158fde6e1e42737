//! SPIDER REST handlers.

use std::time::Instant;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::{IntoParams, ToSchema};

use super::{ErrorResponse, HealthResponse, RootResponse, round_seconds, timestamp, tool_error_response};
use crate::api::AppState;
use crate::tools::spider::{PREDICTION_COMPLETED, PredictionResult, SpiderService, TOOL_NAME};
use crate::tools::{CommandRunner, ToolInfo};

#[derive(Debug, Deserialize, IntoParams)]
pub struct PredictQuery {
    /// Raw protein sequence (no FASTA header)
    #[param(example = "MKTVRQERLKSIVRILERSKEPVSGAQLAEELSVSRQVIVQDIAYLRSLGYNIVATPRGYVLAGG")]
    pub sequence: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PredictionResponse {
    #[schema(example = "success")]
    pub status: String,
    #[schema(example = "Prediction completed successfully")]
    pub message: String,
    pub result: PredictionResult,
    #[schema(example = 4.56)]
    pub processing_time: f64,
    pub timestamp: String,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "system",
    responses(
        (status = 200, description = "API information", body = RootResponse)
    )
)]
#[instrument(skip(state))]
pub async fn root<R: CommandRunner + 'static>(
    State(state): State<AppState<SpiderService<R>>>,
) -> Json<RootResponse> {
    Json(RootResponse::new(TOOL_NAME, "spider", state.version()))
}

#[utoipa::path(
    get,
    path = "/api/v1/spider/health",
    tag = "system",
    responses(
        (status = 200, description = "Health check successful", body = HealthResponse)
    )
)]
#[instrument(skip(state))]
pub async fn health<R: CommandRunner + 'static>(
    State(state): State<AppState<SpiderService<R>>>,
) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(TOOL_NAME, state.version()))
}

#[utoipa::path(
    get,
    path = "/api/v1/spider/info",
    tag = "spider",
    responses(
        (status = 200, description = "Tool information", body = ToolInfo)
    )
)]
#[instrument(skip(state))]
pub async fn info<R: CommandRunner + 'static>(
    State(state): State<AppState<SpiderService<R>>>,
) -> Json<ToolInfo> {
    Json(state.service().tool_info())
}

#[utoipa::path(
    post,
    path = "/api/v1/spider/predict",
    tag = "spider",
    params(PredictQuery),
    responses(
        (status = 200, description = "Prediction completed", body = PredictionResponse),
        (status = 400, description = "Missing or invalid sequence", body = ErrorResponse),
        (status = 500, description = "SPIDER failed", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn predict<R: CommandRunner + 'static>(
    State(state): State<AppState<SpiderService<R>>>,
    Query(query): Query<PredictQuery>,
) -> Result<Json<PredictionResponse>, (StatusCode, Json<ErrorResponse>)> {
    let started = Instant::now();

    let result = state
        .service()
        .predict(query.sequence.as_deref().unwrap_or_default())
        .await
        .map_err(|e| tool_error_response(&e))?;

    let processing_time = round_seconds(started.elapsed());
    info!(processing_time, label = %result.label, "SPIDER prediction finished");

    Ok(Json(PredictionResponse {
        status: "success".to_string(),
        message: PREDICTION_COMPLETED.to_string(),
        result,
        processing_time,
        timestamp: timestamp(),
    }))
}
