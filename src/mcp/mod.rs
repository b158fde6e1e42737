//! MCP-like tool discovery and tool calls over plain HTTP.
//!
//! Agents list the available tools with `GET /mcp/tools` and invoke one with
//! `POST /mcp/call`. Results come back as human-readable text blocks. Both
//! endpoints run through the same services as the REST handlers.
//!
//! - **blastp**: `perform_blastp_search`, `get_tool_info`
//! - **spider**: `predict_druggability`, `get_tool_info`

pub mod blastp;
pub mod spider;


use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::api::v1::{ErrorResponse, error_response};
use crate::tools::ToolInfo;

pub const GET_TOOL_INFO: &str = "get_tool_info";

/// A tool as advertised to agents.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ToolDescriptor {
    pub name: String,
    pub title: String,
    pub description: String,
    /// JSON Schema of the tool arguments
    #[serde(rename = "inputSchema")]
    #[schema(value_type = Object)]
    pub input_schema: Value,
}

impl ToolDescriptor {
    pub fn new(name: &str, title: &str, description: &str, input_schema: Value) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            input_schema,
        }
    }

    /// The descriptor for a tool that takes no arguments.
    pub fn no_arguments(name: &str, title: &str, description: &str) -> Self {
        Self::new(
            name,
            title,
            description,
            serde_json::json!({"type": "object", "properties": {}, "required": []}),
        )
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ToolList {
    pub tools: Vec<ToolDescriptor>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CallToolRequest {
    #[serde(default)]
    #[schema(example = "perform_blastp_search")]
    pub name: String,
    #[serde(default = "empty_arguments")]
    #[schema(value_type = Object)]
    pub arguments: Value,
}

fn empty_arguments() -> Value {
    Value::Object(Map::new())
}

impl CallToolRequest {
    /// Decode the arguments into `T`, rejecting wrong JSON types with a 400.
    pub fn arguments<T: serde::de::DeserializeOwned>(
        &self,
    ) -> Result<T, (StatusCode, Json<ErrorResponse>)> {
        let arguments = match &self.arguments {
            Value::Null => empty_arguments(),
            other => other.clone(),
        };
        serde_json::from_value(arguments).map_err(|e| {
            error_response(
                StatusCode::BAD_REQUEST,
                format!("Invalid arguments for {}: {}", self.name, e),
            )
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Content {
    #[serde(rename = "type")]
    #[schema(example = "text")]
    pub kind: String,
    pub text: String,
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CallToolResponse {
    pub content: Vec<Content>,
}

impl CallToolResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![Content::text(text)],
        }
    }
}

pub fn unknown_tool(name: &str) -> (StatusCode, Json<ErrorResponse>) {
    error_response(StatusCode::BAD_REQUEST, format!("Unknown tool: {}", name))
}

pub fn sequence_required() -> (StatusCode, Json<ErrorResponse>) {
    error_response(StatusCode::BAD_REQUEST, "Sequence is required")
}

/// Render a float the way agents expect to read it: `99.0`, `0.001`, `1e-05`.
pub fn display_float(value: f64) -> String {
    let magnitude = value.abs();
    if value != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let formatted = format!("{:e}", value);
        match formatted.split_once('e') {
            Some((mantissa, exponent)) => {
                let (sign, digits) = match exponent.strip_prefix('-') {
                    Some(digits) => ('-', digits),
                    None => ('+', exponent),
                };
                format!("{}e{}{:0>2}", mantissa, sign, digits)
            }
            None => formatted,
        }
    } else if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// Plain-text rendering of [`ToolInfo`].
pub fn info_text(info: &ToolInfo) -> String {
    let or_unknown = |value: Option<&str>| value.unwrap_or("Unknown").to_string();
    format!(
        "\n{} Tool Information:\n- Name: {}\n- Version: {}\n- Description: {}\n- Input Format: {}\n- Output Format: {}\n",
        info.name,
        info.name,
        info.version,
        info.description,
        info.input_format,
        or_unknown(info.output_format.as_deref()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_text_marks_missing_fields_unknown() {
        let info = ToolInfo {
            name: "SPIDER".to_string(),
            version: "1.0".to_string(),
            description: "Predictor".to_string(),
            input_format: "FASTA".to_string(),
            output_format: None,
            home_directory: None,
        };

        let text = info_text(&info);
        assert!(text.contains("SPIDER Tool Information:"));
        assert!(text.contains("- Version: 1.0"));
        assert!(text.contains("- Output Format: Unknown"));
    }

    #[test]
    fn test_display_float() {
        assert_eq!(display_float(99.0), "99.0");
        assert_eq!(display_float(0.001), "0.001");
        assert_eq!(display_float(1e-39), "1e-39");
        assert_eq!(display_float(2.5e-10), "2.5e-10");
        assert_eq!(display_float(0.0), "0.0");
        assert_eq!(display_float(0.87), "0.87");
    }

    #[test]
    fn test_display_float_pads_exponent() {
        assert_eq!(display_float(1e-5), "1e-05");
        assert_eq!(display_float(3.2e-9), "3.2e-09");
        assert_eq!(display_float(1e16), "1e+16");
        assert_eq!(display_float(-4e-7), "-4e-07");
        assert_eq!(display_float(1.5e-120), "1.5e-120");
    }

    #[test]
    fn test_call_request_defaults() {
        let request: CallToolRequest = serde_json::from_str(r#"{"name": "get_tool_info"}"#).unwrap();
        assert_eq!(request.name, "get_tool_info");
        assert_eq!(request.arguments, empty_arguments());
    }

    #[test]
    fn test_descriptor_uses_camel_case_schema_key() {
        let descriptor = ToolDescriptor::no_arguments("get_tool_info", "Get Tool Info", "Info");
        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["inputSchema"]["type"], "object");
        assert!(json.get("input_schema").is_none());
    }
}
