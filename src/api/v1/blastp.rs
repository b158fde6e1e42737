//! BLASTp REST handlers.

use std::time::Instant;

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;

use super::{ErrorResponse, HealthResponse, RootResponse, round_seconds, timestamp, tool_error_response};
use crate::api::AppState;
use crate::tools::blastp::{
    BlastpService, OutputFormat, SEARCH_COMPLETED, SearchParameters, SearchResult, TOOL_NAME,
};
use crate::tools::{CommandRunner, ToolInfo};

// =============================================================================
// DTOs
// =============================================================================

/// Search request. Every field except `sequence` falls back to its default.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SearchRequest {
    /// Raw protein sequence (no FASTA header)
    #[schema(example = "MKTVRQERLKSIVRILERSKEPVSGAQLAEELSVSRQVIVQDIAYLRSLGYNIVATPRGYVLAGG")]
    pub sequence: Option<String>,
    #[schema(example = "nr")]
    pub db_name: Option<String>,
    #[schema(example = 0.001)]
    pub evalue: Option<f64>,
    #[schema(example = 20)]
    pub max_target_seqs: Option<u32>,
    #[schema(example = "6 qseqid sseqid pident length evalue bitscore sscinames")]
    pub outfmt: Option<String>,
    /// "table" or "json"; anything other than "json" gives a table
    #[schema(example = "table")]
    pub output_format: Option<String>,
}

impl SearchRequest {
    pub fn sequence(&self) -> &str {
        self.sequence.as_deref().unwrap_or_default()
    }

    pub fn parameters(&self) -> SearchParameters {
        let defaults = SearchParameters::default();
        SearchParameters {
            db_name: self.db_name.clone().unwrap_or(defaults.db_name),
            evalue: self.evalue.unwrap_or(defaults.evalue),
            max_target_seqs: self.max_target_seqs.unwrap_or(defaults.max_target_seqs),
            outfmt: self.outfmt.clone().unwrap_or(defaults.outfmt),
            output_format: self
                .output_format
                .as_deref()
                .map(OutputFormat::parse_lenient)
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResponse {
    #[schema(example = "success")]
    pub status: String,
    #[schema(example = "Search completed successfully")]
    pub message: String,
    pub result: SearchResult,
    /// Seconds, rounded to two decimals
    #[schema(example = 1.23)]
    pub processing_time: f64,
    pub timestamp: String,
}

// =============================================================================
// Handlers
// =============================================================================

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
    State(state): State<AppState<BlastpService<R>>>,
) -> Json<RootResponse> {
    Json(RootResponse::new(TOOL_NAME, "blastp", state.version()))
}

#[utoipa::path(
    get,
    path = "/api/v1/blastp/health",
    tag = "system",
    responses(
        (status = 200, description = "Health check successful", body = HealthResponse)
    )
)]
#[instrument(skip(state))]
pub async fn health<R: CommandRunner + 'static>(
    State(state): State<AppState<BlastpService<R>>>,
) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(TOOL_NAME, state.version()))
}

#[utoipa::path(
    get,
    path = "/api/v1/blastp/info",
    tag = "blastp",
    responses(
        (status = 200, description = "Tool information", body = ToolInfo),
        (status = 500, description = "Version query failed", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn info<R: CommandRunner + 'static>(
    State(state): State<AppState<BlastpService<R>>>,
) -> Result<Json<ToolInfo>, (StatusCode, Json<ErrorResponse>)> {
    let info = state
        .service()
        .tool_info()
        .await
        .map_err(|e| tool_error_response(&e))?;
    Ok(Json(info))
}

#[utoipa::path(
    post,
    path = "/api/v1/blastp/search",
    tag = "blastp",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Search completed", body = SearchResponse),
        (status = 400, description = "Missing or invalid sequence", body = ErrorResponse),
        (status = 500, description = "BLASTp failed", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn search<R: CommandRunner + 'static>(
    State(state): State<AppState<BlastpService<R>>>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, (StatusCode, Json<ErrorResponse>)> {
    let started = Instant::now();

    let result = state
        .service()
        .search(req.sequence(), &req.parameters())
        .await
        .map_err(|e| tool_error_response(&e))?;

    let processing_time = round_seconds(started.elapsed());
    info!(processing_time, "BLASTp search finished");

    Ok(Json(SearchResponse {
        status: "success".to_string(),
        message: SEARCH_COMPLETED.to_string(),
        result,
        processing_time,
        timestamp: timestamp(),
    }))
}
