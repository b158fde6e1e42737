//! Parsing of the single-row prediction CSV.

use serde::Serialize;
use utoipa::ToSchema;

use super::service::TOOL_NAME;
use crate::tools::ToolError;

/// Druggability prediction for one sequence.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PredictionResult {
    #[schema(example = "druggable")]
    pub label: String,
    #[schema(example = 0.87)]
    pub probability: f64,
}

/// Parse `<id>,<label>,<probability>[,...]`.
pub fn parse_prediction(contents: &str) -> Result<PredictionResult, ToolError> {
    let malformed = |message: String| ToolError::MalformedOutput {
        tool: TOOL_NAME,
        message,
    };

    let lines: Vec<&str> = contents
        .trim()
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();

    let line = match lines.as_slice() {
        [line] => line.trim(),
        [] => return Err(malformed("SPIDER output is empty".to_string())),
        _ => {
            return Err(malformed(
                "SPIDER output contains multiple lines".to_string(),
            ));
        }
    };

    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < 3 {
        return Err(malformed(format!(
            "expected at least 3 fields, found {}",
            fields.len()
        )));
    }

    let probability = fields[2]
        .parse::<f64>()
        .map_err(|e| malformed(format!("probability '{}': {}", fields[2], e)))?;

    Ok(PredictionResult {
        label: fields[1].to_string(),
        probability,
    })
}
