//! MCP-like tools for the BLASTp server.

use std::time::Instant;

use axum::{Json, extract::State, http::StatusCode};
use serde_json::json;
use tracing::{info, instrument};

use super::{
    CallToolRequest, CallToolResponse, GET_TOOL_INFO, ToolDescriptor, ToolList, display_float,
    info_text, sequence_required, unknown_tool,
};
use crate::api::AppState;
use crate::api::v1::blastp::SearchRequest;
use crate::api::v1::{ErrorResponse, round_seconds, tool_error_response};
use crate::tools::CommandRunner;
use crate::tools::blastp::{
    BlastpService, DEFAULT_DB_NAME, DEFAULT_EVALUE, DEFAULT_MAX_TARGET_SEQS, DEFAULT_OUTFMT,
    SEARCH_COMPLETED, SearchResult,
};

pub const SEARCH_TOOL: &str = "perform_blastp_search";

/// Hits listed in a structured summary.
const SUMMARY_HITS: usize = 5;
/// Characters of the query echoed in a structured summary.
const SUMMARY_QUERY_CHARS: usize = 50;

pub fn tool_descriptors() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(
            SEARCH_TOOL,
            "BLAST protein sequence",
            "Search a protein sequence against a BLAST database",
            json!({
                "type": "object",
                "properties": {
                    "sequence": {
                        "type": "string",
                        "description": "Protein sequence to analyze"
                    },
                    "db_name": {
                        "type": "string",
                        "description": format!("BLAST database name (default: {})", DEFAULT_DB_NAME),
                        "default": DEFAULT_DB_NAME
                    },
                    "evalue": {
                        "type": "number",
                        "description": format!("E-value threshold (default: {})", DEFAULT_EVALUE),
                        "default": DEFAULT_EVALUE
                    },
                    "max_target_seqs": {
                        "type": "integer",
                        "description": format!(
                            "Maximum number of target sequences (default: {})",
                            DEFAULT_MAX_TARGET_SEQS
                        ),
                        "default": DEFAULT_MAX_TARGET_SEQS
                    },
                    "outfmt": {
                        "type": "string",
                        "description": format!("Output format (default: {})", DEFAULT_OUTFMT),
                        "default": DEFAULT_OUTFMT
                    },
                    "output_format": {
                        "type": "string",
                        "description": "Response format: 'table' for formatted text or 'json' for structured data (default: table)",
                        "default": "table",
                        "enum": ["table", "json"]
                    }
                },
                "required": ["sequence"]
            }),
        ),
        ToolDescriptor::no_arguments(
            GET_TOOL_INFO,
            "Get Tool Info",
            "Get information about the BLASTp tool",
        ),
    ]
}

/// Text summary of a search result.
pub fn summary_text(result: &SearchResult, processing_time: f64) -> String {
    match result {
        SearchResult::Structured(report) => {
            let query: String = report
                .query_sequence
                .chars()
                .take(SUMMARY_QUERY_CHARS)
                .collect();
            let ellipsis = if report.query_sequence.chars().count() > SUMMARY_QUERY_CHARS {
                "..."
            } else {
                ""
            };

            let mut text = format!(
                "\nBLASTp Search Results (JSON Format):\n- Status: Success\n- Total Hits: {}\n- Query Sequence: {}{}\n- Processing Time: {}s\n\nTop Hits:\n",
                report.total_hits,
                query,
                ellipsis,
                display_float(processing_time),
            );
            for (i, hit) in report.hits.iter().take(SUMMARY_HITS).enumerate() {
                text.push_str(&format!(
                    "\n{}. {}\n   - Identity: {}%\n   - Alignment Length: {}\n   - E-value: {}\n   - Bitscore: {}\n   - Organism: {}\n",
                    i + 1,
                    hit.subject_id,
                    display_float(hit.percent_identity),
                    hit.alignment_length,
                    display_float(hit.evalue),
                    display_float(hit.bitscore),
                    hit.organism.as_deref().unwrap_or("Unknown"),
                ));
            }
            text
        }
        SearchResult::Table(table) => format!(
            "\nBLASTp Search Results (Table Format):\n- Status: Success\n- Report: {}\n- Message: {}\n- Processing Time: {}s\n",
            table.report,
            SEARCH_COMPLETED,
            display_float(processing_time),
        ),
    }
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
    State(state): State<AppState<BlastpService<R>>>,
    Json(request): Json<CallToolRequest>,
) -> Result<Json<CallToolResponse>, (StatusCode, Json<ErrorResponse>)> {
    match request.name.as_str() {
        SEARCH_TOOL => {
            let args: SearchRequest = request.arguments()?;
            if args.sequence().trim().is_empty() {
                return Err(sequence_required());
            }

            let started = Instant::now();
            let result = state
                .service()
                .search(args.sequence(), &args.parameters())
                .await
                .map_err(|e| tool_error_response(&e))?;
            let processing_time = round_seconds(started.elapsed());
            info!(processing_time, "MCP BLASTp search finished");

            Ok(Json(CallToolResponse::text(summary_text(
                &result,
                processing_time,
            ))))
        }
        GET_TOOL_INFO => {
            let info = state
                .service()
                .tool_info()
                .await
                .map_err(|e| tool_error_response(&e))?;
            Ok(Json(CallToolResponse::text(info_text(&info))))
        }
        other => Err(unknown_tool(other)),
    }
}
