//! Descriptive metadata about a wrapped tool.

use serde::Serialize;
use utoipa::ToSchema;

/// Tool information, recomputed per request.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ToolInfo {
    #[schema(example = "BLASTp")]
    pub name: String,
    #[schema(example = "blastp: 2.16.0+")]
    pub version: String,
    pub description: String,
    #[schema(example = "FASTA")]
    pub input_format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_directory: Option<String>,
}
