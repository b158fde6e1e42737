//! Tool service error types.
//!
//! Uses miette for diagnostic output and thiserror for derive macros.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use super::runner::RunnerError;

/// Errors from a single tool request.
///
/// Every variant is terminal for the request; nothing is retried.
#[derive(Error, Diagnostic, Debug)]
pub enum ToolError {
    #[error("No sequence provided")]
    #[diagnostic(code(biowrap::tools::empty_sequence))]
    EmptySequence,

    #[error("Invalid sequence format")]
    #[diagnostic(code(biowrap::tools::invalid_sequence))]
    InvalidSequence,

    #[error("Invalid or missing FASTA file: {}", path.display())]
    #[diagnostic(code(biowrap::tools::invalid_fasta_file))]
    InvalidFastaFile { path: PathBuf },

    #[error("{tool} execution failed: {stderr}")]
    #[diagnostic(code(biowrap::tools::execution_failed))]
    ExecutionFailed {
        tool: &'static str,
        code: Option<i32>,
        stderr: String,
    },

    #[error("{tool} {operation} timed out")]
    #[diagnostic(code(biowrap::tools::timed_out))]
    TimedOut {
        tool: &'static str,
        operation: &'static str,
    },

    #[error("Error running {tool}: {source}")]
    #[diagnostic(
        code(biowrap::tools::launch_failed),
        help("Is the environment launcher installed and on PATH?")
    )]
    Launch {
        tool: &'static str,
        #[source]
        source: RunnerError,
    },

    #[error("{tool} did not generate output file")]
    #[diagnostic(code(biowrap::tools::missing_output))]
    MissingOutput { tool: &'static str },

    #[error("Failed to download BLAST database '{db_name}' (exit code {code:?}): {stderr}")]
    #[diagnostic(
        code(biowrap::tools::database_refresh),
        help(
            "Check internet connectivity, that BLAST_DB_PATH is writable and has free space, and that the database name is correct (e.g. 'pdbaa' instead of 'nr')."
        )
    )]
    DatabaseRefresh {
        db_name: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Error parsing {tool} results: {message}")]
    #[diagnostic(code(biowrap::tools::malformed_output))]
    MalformedOutput { tool: &'static str, message: String },

    #[error("Error running {tool}: {source}")]
    #[diagnostic(code(biowrap::tools::io))]
    Io {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl ToolError {
    /// Whether the error was caused by the caller's input rather than the tool.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ToolError::EmptySequence
                | ToolError::InvalidSequence
                | ToolError::InvalidFastaFile { .. }
        )
    }

    pub(crate) fn io(tool: &'static str) -> impl Fn(std::io::Error) -> ToolError {
        move |source| ToolError::Io { tool, source }
    }
}

/// Startup configuration errors. Fatal: the server refuses to start.
#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("BLAST_DB_PATH environment variable must be set for database storage")]
    #[diagnostic(
        code(biowrap::config::missing_db_path),
        help(
            "Provide a writable directory for BLAST databases, e.g.\n  docker run -e BLAST_DB_PATH=/blast_db -v /host/path:/blast_db blast-api\nor pass --db-path to the blastp subcommand."
        )
    )]
    MissingDbPath,

    #[error("Directory '{}' is not writable: {source}", path.display())]
    #[diagnostic(
        code(biowrap::config::not_writable),
        help(
            "Ensure the directory exists with write permissions. If using Docker, check that the volume mapping is correct and the host directory is writable."
        )
    )]
    NotWritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Tool home directory '{}' does not exist", path.display())]
    #[diagnostic(
        code(biowrap::config::missing_home),
        help("Set SPIDER_HOME (or --home) to the SPIDER installation directory.")
    )]
    MissingToolHome { path: PathBuf },
}
