//! BLASTp protein alignment search.
//!
//! The service turns a query sequence plus [`SearchParameters`] into a
//! `blastp` run and renders the tabular output as a [`SearchResult`].

mod config;
mod params;
mod report;
mod service;

#[cfg(test)]
mod config_test;

pub use config::{
    AUTO_UPDATE_ENV, BlastpConfig, DB_PATH_ENV, DEFAULT_MM_ENV, DEFAULT_OUTPUT_DIR, MM_ENV_ENV,
    OUTPUT_PATH_ENV,
};
pub use params::{
    DEFAULT_DB_NAME, DEFAULT_EVALUE, DEFAULT_MAX_TARGET_SEQS, DEFAULT_OUTFMT, OutputFormat,
    SearchParameters,
};
pub use report::{
    DEFAULT_HEADER, Hit, SearchResult, StructuredReport, TableReport, format_table, parse_hits,
    render,
};
pub use service::{
    BlastpService, DESCRIPTION, OUTPUT_FORMATS, REFRESH_TIMEOUT, SEARCH_COMPLETED, TOOL_NAME,
};
