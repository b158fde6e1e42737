//! V1 REST handlers and the response helpers shared with the MCP-like layer.

pub mod blastp;
pub mod spider;
mod system;

#[cfg(test)]
mod spider_test;
#[cfg(test)]
pub(crate) mod test_helpers;

use std::time::Duration;

use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::tools::ToolError;

pub use system::{HealthResponse, RootResponse};

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "error")]
    pub status: String,
    /// Error message
    #[schema(example = "Invalid sequence format")]
    pub error: String,
    #[schema(example = "Invalid sequence format")]
    pub message: String,
    #[schema(example = "2025-01-01T12:00:00.000000+00:00")]
    pub timestamp: String,
}

/// Current time as RFC 3339.
pub fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Elapsed seconds rounded to two decimals.
pub fn round_seconds(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 100.0).round() / 100.0
}

pub fn error_response(
    status: StatusCode,
    message: impl Into<String>,
) -> (StatusCode, Json<ErrorResponse>) {
    let message = message.into();
    (
        status,
        Json(ErrorResponse {
            status: "error".to_string(),
            error: message.clone(),
            message,
            timestamp: timestamp(),
        }),
    )
}

/// Map a tool error to 400 for bad input and 500 for everything else.
pub fn tool_error_response(err: &ToolError) -> (StatusCode, Json<ErrorResponse>) {
    let status = if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    warn!(status = status.as_u16(), "Request failed: {}", err);
    error_response(status, err.to_string())
}
