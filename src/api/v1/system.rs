//! Root and health payloads.

use serde::Serialize;
use utoipa::ToSchema;

use super::timestamp;

/// API information
#[derive(Debug, Serialize, ToSchema)]
pub struct RootResponse {
    #[schema(example = "BLASTp API - Bioinformatics Tool Wrapper")]
    pub message: String,
    #[schema(example = "1.0.0")]
    pub version: String,
    #[schema(example = "/docs")]
    pub docs: String,
    #[schema(example = "/api/v1/blastp/health")]
    pub health: String,
}

impl RootResponse {
    /// `slug` is the tool's path segment under `/api/v1`.
    pub fn new(tool: &str, slug: &str, version: &str) -> Self {
        Self {
            message: format!("{} API - Bioinformatics Tool Wrapper", tool),
            version: version.to_string(),
            docs: "/docs".to_string(),
            health: format!("/api/v1/{}/health", slug),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    #[schema(example = "healthy")]
    pub status: String,
    pub timestamp: String,
    #[schema(example = "BLASTp")]
    pub tool: String,
    #[schema(example = "1.0.0")]
    pub version: String,
}

impl HealthResponse {
    pub fn healthy(tool: &str, version: &str) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: timestamp(),
            tool: tool.to_string(),
            version: version.to_string(),
        }
    }
}
