//! MCP-like tools for the SPIDER server.

use std::time::Instant;

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use super::{
    CallToolRequest, CallToolResponse, GET_TOOL_INFO, ToolDescriptor, ToolList, display_float,
    info_text, sequence_required, unknown_tool,
};
use crate::api::AppState;
use crate::api::v1::{ErrorResponse, round_seconds, tool_error_response};
use crate::tools::CommandRunner;
use crate::tools::spider::{PREDICTION_COMPLETED, PredictionResult, SpiderService};

pub const PREDICT_TOOL: &str = "predict_druggability";

#[derive(Debug, Default, Deserialize)]
struct PredictArguments {
    sequence: Option<String>,
}

pub fn tool_descriptors() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(
            PREDICT_TOOL,
            "Predict Druggability",
            "Predict druggability of a protein sequence using SPIDER",
            json!({
                "type": "object",
                "properties": {
                    "sequence": {
                        "type": "string",
                        "description": "Protein sequence to analyze"
                    }
                },
                "required": ["sequence"]
            }),
        ),
        ToolDescriptor::no_arguments(
            GET_TOOL_INFO,
            "Get Tool Info",
            "Get information about the SPIDER tool",
        ),
    ]
}

pub fn summary_text(result: &PredictionResult, processing_time: f64) -> String {
    format!(
        "\nSPIDER Prediction Results:\n- Status: Success\n- Prediction: {}\n- Probability: {}\n- Message: {}\n- Processing Time: {}s\n",
        result.label,
        display_float(result.probability),
        PREDICTION_COMPLETED,
        display_float(processing_time),
    )
}

#[utoipa::path(
    get,
    path = "/mcp/tools",
    tag = "mcp",
    responses(
        (status = 200, description = "Available tools", body = ToolList)
    )
)]
#[instrument]
pub async fn list_tools() -> Json<ToolList> {
    Json(ToolList {
        tools: tool_descriptors(),
    })
}

#[utoipa::path(
    post,
    path = "/mcp/call",
    tag = "mcp",
    request_body = CallToolRequest,
    responses(
        (status = 200, description = "Tool result", body = CallToolResponse),
        (status = 400, description = "Unknown tool or bad arguments", body = ErrorResponse),
        (status = 500, description = "Tool failed", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn call_tool<R: CommandRunner + 'static>(
    State(state): State<AppState<SpiderService<R>>>,
    Json(request): Json<CallToolRequest>,
) -> Result<Json<CallToolResponse>, (StatusCode, Json<ErrorResponse>)> {
    match request.name.as_str() {
        PREDICT_TOOL => {
            let args: PredictArguments = request.arguments()?;
            let sequence = args.sequence.as_deref().unwrap_or_default();
            if sequence.trim().is_empty() {
                return Err(sequence_required());
            }

            let started = Instant::now();
            let result = state
                .service()
                .predict(sequence)
                .await
                .map_err(|e| tool_error_response(&e))?;
            let processing_time = round_seconds(started.elapsed());
            info!(processing_time, "MCP SPIDER prediction finished");

            Ok(Json(CallToolResponse::text(summary_text(
                &result,
                processing_time,
            ))))
        }
        GET_TOOL_INFO => Ok(Json(CallToolResponse::text(info_text(
            &state.service().tool_info(),
        )))),
        other => Err(unknown_tool(other)),
    }
}
