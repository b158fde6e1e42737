//! BLASTp search service.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use super::config::BlastpConfig;
use super::params::SearchParameters;
use super::report::{self, SearchResult};
use crate::fasta::{QueryFile, validate_fasta_file};
use crate::tools::{
    CommandRunner, DEFAULT_TIMEOUT, DatabaseRegistry, Invocation, ToolError, ToolInfo,
    check_output,
};

pub const TOOL_NAME: &str = "BLASTp";
pub const SEARCH_COMPLETED: &str = "Search completed successfully";
pub const DESCRIPTION: &str = "BLASTp is a protein-protein sequence alignment tool that uses a database of protein sequences to search for similar sequences in a query protein sequence.";
pub const OUTPUT_FORMATS: &str = "Tabular (outfmt 6) or JSON";

/// Database downloads can be very large.
pub const REFRESH_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

const OUTPUT_FILE: &str = "blastp_output.txt";

/// Runs `blastp` searches through a [`CommandRunner`].
pub struct BlastpService<R: CommandRunner> {
    config: BlastpConfig,
    runner: R,
    registry: Arc<DatabaseRegistry>,
    timeout: Duration,
}

impl<R: CommandRunner> BlastpService<R> {
    pub fn new(config: BlastpConfig, runner: R, registry: Arc<DatabaseRegistry>) -> Self {
        Self {
            config,
            runner,
            registry,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the per-search timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[cfg(test)]
    pub(crate) fn registry(&self) -> &DatabaseRegistry {
        &self.registry
    }

    /// Validate `sequence`, write it to a temporary FASTA file and search with it.
    ///
    /// The query file is removed when this returns, whatever the outcome.
    pub async fn search(
        &self,
        sequence: &str,
        params: &SearchParameters,
    ) -> Result<SearchResult, ToolError> {
        if sequence.trim().is_empty() {
            return Err(ToolError::EmptySequence);
        }

        let query = QueryFile::create(sequence).map_err(ToolError::io(TOOL_NAME))?;
        if !query.is_valid() {
            return Err(ToolError::InvalidSequence);
        }

        self.run_search(query.path(), params, sequence).await
    }

    /// Search the configured database with an existing FASTA file.
    pub async fn run_search(
        &self,
        fasta_path: &Path,
        params: &SearchParameters,
        query_sequence: &str,
    ) -> Result<SearchResult, ToolError> {
        if !validate_fasta_file(fasta_path) {
            return Err(ToolError::InvalidFastaFile {
                path: fasta_path.to_path_buf(),
            });
        }

        self.ensure_database(&params.db_name).await?;

        // One directory per search, removed on drop.
        tokio::fs::create_dir_all(self.config.output_dir())
            .await
            .map_err(ToolError::io(TOOL_NAME))?;
        let work_dir = tempfile::Builder::new()
            .prefix("blastp_")
            .tempdir_in(self.config.output_dir())
            .map_err(ToolError::io(TOOL_NAME))?;
        let output_path = work_dir.path().join(OUTPUT_FILE);

        let invocation = self.search_invocation(fasta_path, params, &output_path);
        info!(command = %invocation, "Running BLASTp search");

        let result = self.runner.run(&invocation, self.timeout).await;
        check_output(TOOL_NAME, "search", result)?;

        let raw = match tokio::fs::read_to_string(&output_path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ToolError::MissingOutput { tool: TOOL_NAME });
            }
            Err(e) => return Err(ToolError::io(TOOL_NAME)(e)),
        };

        debug!(bytes = raw.len(), "BLASTp output read");
        Ok(report::render(&raw, params.output_format, query_sequence))
    }

    /// The search command line for one query.
    pub fn search_invocation(
        &self,
        fasta_path: &Path,
        params: &SearchParameters,
        output_path: &Path,
    ) -> Invocation {
        let db_path = self.config.database(&params.db_name);
        self.config.env.wrap(
            "blastp",
            [
                "-query".to_string(),
                fasta_path.display().to_string(),
                "-db".to_string(),
                db_path.display().to_string(),
                "-evalue".to_string(),
                params.evalue.to_string(),
                "-outfmt".to_string(),
                params.outfmt.clone(),
                "-max_target_seqs".to_string(),
                params.max_target_seqs.to_string(),
                "-out".to_string(),
                output_path.display().to_string(),
            ],
        )
    }

    /// The database download command, run from the database directory.
    pub fn refresh_invocation(&self, db_name: &str) -> Invocation {
        self.config
            .env
            .wrap("update_blastdb.pl", ["--passive", "--decompress", db_name])
            .current_dir(&self.config.db_path)
    }

    /// Refresh `db_name` once per service lifetime when auto-update is on.
    ///
    /// A failed refresh leaves the name unchecked so the next request tries again.
    async fn ensure_database(&self, db_name: &str) -> Result<(), ToolError> {
        if self.registry.is_checked(db_name) {
            return Ok(());
        }

        if self.config.auto_update {
            let invocation = self.refresh_invocation(db_name);
            info!(db_name, command = %invocation, "Refreshing BLAST database");

            let result = self.runner.run(&invocation, REFRESH_TIMEOUT).await;
            match check_output(TOOL_NAME, "database refresh", result) {
                Ok(_) => info!(db_name, "BLAST database is up to date"),
                Err(ToolError::ExecutionFailed { code, stderr, .. }) => {
                    return Err(ToolError::DatabaseRefresh {
                        db_name: db_name.to_string(),
                        code,
                        stderr,
                    });
                }
                Err(other) => return Err(other),
            }
        } else {
            debug!(db_name, "Auto-update disabled, using local database");
        }

        self.registry.mark_checked(db_name);
        Ok(())
    }

    /// Version string reported by `blastp -version`.
    pub async fn version(&self) -> Result<String, ToolError> {
        let invocation = self.config.env.wrap("blastp", ["-version"]);
        let result = self.runner.run(&invocation, self.timeout).await;
        let output = check_output(TOOL_NAME, "version query", result)?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    pub async fn tool_info(&self) -> Result<ToolInfo, ToolError> {
        Ok(ToolInfo {
            name: TOOL_NAME.to_string(),
            version: self.version().await?,
            description: DESCRIPTION.to_string(),
            input_format: "FASTA".to_string(),
            output_format: Some(OUTPUT_FORMATS.to_string()),
            home_directory: None,
        })
    }
}
