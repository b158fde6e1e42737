//! BLASTp search parameters.

pub const DEFAULT_EVALUE: f64 = 1e-3;
pub const DEFAULT_MAX_TARGET_SEQS: u32 = 20;
pub const DEFAULT_OUTFMT: &str = "6 qseqid sseqid pident length evalue bitscore sscinames";
pub const DEFAULT_DB_NAME: &str = "nr";

/// Shape of a search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Rank-prefixed tab-separated report text
    #[default]
    Table,
    /// Structured hit list
    Json,
}

impl OutputFormat {
    /// Lenient selector: "json" in any case is structured, anything else is a table.
    pub fn parse_lenient(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        }
    }
}

/// Parameters for one search. Fields are independent and only type-checked;
/// the threshold is not range-checked.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParameters {
    pub db_name: String,
    pub evalue: f64,
    pub max_target_seqs: u32,
    pub outfmt: String,
    pub output_format: OutputFormat,
}

impl Default for SearchParameters {
    fn default() -> Self {
        Self {
            db_name: DEFAULT_DB_NAME.to_string(),
            evalue: DEFAULT_EVALUE,
            max_target_seqs: DEFAULT_MAX_TARGET_SEQS,
            outfmt: DEFAULT_OUTFMT.to_string(),
            output_format: OutputFormat::Table,
        }
    }
}
