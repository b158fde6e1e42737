//! Conversion of raw `-outfmt 6` output into reports.
//!
//! Expected columns: qseqid sseqid pident length evalue bitscore [sscinames].

use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use super::params::OutputFormat;

/// Header row of the tabular report.
pub const DEFAULT_HEADER: &str = "rank\tid\tidentity%\talign_len\te-value\tbitscore\torganism";

/// One alignment hit.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Hit {
    /// 1-based line position in the tool output
    #[schema(example = 1)]
    pub rank: usize,
    #[schema(example = "sequence")]
    pub query_id: String,
    #[schema(example = "sp|P69905|HBA_HUMAN")]
    pub subject_id: String,
    #[schema(example = 98.6)]
    pub percent_identity: f64,
    #[schema(example = 142)]
    pub alignment_length: u64,
    #[schema(example = 1e-50)]
    pub evalue: f64,
    #[schema(example = 285.0)]
    pub bitscore: f64,
    /// Present only when the output carries a 7th column
    #[schema(example = "Homo sapiens")]
    pub organism: Option<String>,
}

/// Text report with a header row and rank-prefixed lines.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TableReport {
    pub report: String,
}

/// Structured hit list.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StructuredReport {
    pub hits: Vec<Hit>,
    pub total_hits: usize,
    /// The submitted query, echoed back untruncated
    pub query_sequence: String,
}

/// A search result in the requested shape.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum SearchResult {
    Table(TableReport),
    Structured(StructuredReport),
}

/// Render raw tool output in the requested shape.
pub fn render(raw: &str, format: OutputFormat, query_sequence: &str) -> SearchResult {
    match format {
        OutputFormat::Table => SearchResult::Table(format_table(raw)),
        OutputFormat::Json => SearchResult::Structured(parse_hits(raw, query_sequence)),
    }
}

/// Prepend the header and a 1-based rank to every output line.
pub fn format_table(raw: &str) -> TableReport {
    let trimmed = raw.trim();
    let mut report_lines = vec![DEFAULT_HEADER.to_string()];
    if !trimmed.is_empty() {
        report_lines.extend(
            trimmed
                .lines()
                .enumerate()
                .map(|(i, line)| format!("{}\t{}", i + 1, line)),
        );
    }

    TableReport {
        report: report_lines.join("\n"),
    }
}

/// Parse tab-separated lines into hits, dropping malformed lines with a warning.
pub fn parse_hits(raw: &str, query_sequence: &str) -> StructuredReport {
    let hits: Vec<Hit> = raw
        .trim()
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(i, line)| match parse_hit(i + 1, line) {
            Ok(hit) => Some(hit),
            Err(reason) => {
                warn!(line = i + 1, "Skipping malformed BLASTp line: {}", reason);
                None
            }
        })
        .collect();

    StructuredReport {
        total_hits: hits.len(),
        hits,
        query_sequence: query_sequence.to_string(),
    }
}

fn parse_hit(rank: usize, line: &str) -> Result<Hit, String> {
    let parts: Vec<&str> = line.trim().split('\t').collect();
    if parts.len() < 6 {
        return Err(format!("expected at least 6 fields, found {}", parts.len()));
    }

    let float = |i: usize, name: &str| {
        parts[i]
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("{} '{}': {}", name, parts[i], e))
    };

    Ok(Hit {
        rank,
        query_id: parts[0].to_string(),
        subject_id: parts[1].to_string(),
        percent_identity: float(2, "percent identity")?,
        alignment_length: parts[3]
            .trim()
            .parse::<u64>()
            .map_err(|e| format!("alignment length '{}': {}", parts[3], e))?,
        evalue: float(4, "e-value")?,
        bitscore: float(5, "bitscore")?,
        organism: parts.get(6).map(|s| s.to_string()),
    })
}
