//! SPIDER druggability prediction service.
//!
//! `spider.py` reads `input/seq.fasta` and writes `output/predict_result.csv`
//! relative to its working directory. In shared mode that directory is the
//! tool home and runs are serialized; in isolated mode every run gets a
//! scratch directory with its own `input/` and `output/`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::TempDir;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::config::{INPUT_DIR, INPUT_FILE, MODEL_DIR, OUTPUT_DIR, OUTPUT_FILE, SCRIPT, SpiderConfig};
use super::parse::{PredictionResult, parse_prediction};
use crate::fasta::{QueryFile, validate_fasta_file};
use crate::tools::{CommandRunner, DEFAULT_TIMEOUT, Invocation, ToolError, ToolInfo, check_output};

pub const TOOL_NAME: &str = "SPIDER";
pub const VERSION: &str = "1.0";
pub const DESCRIPTION: &str =
    "Stacking-based ensemble learning framework for accurate prediction of druggable proteins";
pub const PREDICTION_COMPLETED: &str = "Prediction completed successfully";

/// Removes the listed files when dropped.
struct RemoveOnDrop(Vec<PathBuf>);

impl Drop for RemoveOnDrop {
    fn drop(&mut self) {
        for path in &self.0 {
            match std::fs::remove_file(path) {
                Ok(()) => debug!(path = %path.display(), "Removed SPIDER file"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => warn!(path = %path.display(), "Failed to remove SPIDER file: {}", e),
            }
        }
    }
}

pub struct SpiderService<R: CommandRunner> {
    config: SpiderConfig,
    runner: R,
    /// Guards the fixed input/output paths in shared mode.
    shared_workdir: Mutex<()>,
    timeout: Duration,
}

impl<R: CommandRunner> SpiderService<R> {
    pub fn new(config: SpiderConfig, runner: R) -> Self {
        Self {
            config,
            runner,
            shared_workdir: Mutex::new(()),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validate `sequence`, write it as FASTA and predict its druggability.
    pub async fn predict(&self, sequence: &str) -> Result<PredictionResult, ToolError> {
        if sequence.trim().is_empty() {
            return Err(ToolError::EmptySequence);
        }

        let query = QueryFile::create(sequence).map_err(ToolError::io(TOOL_NAME))?;
        if !query.is_valid() {
            return Err(ToolError::InvalidSequence);
        }

        self.run_prediction(query.path()).await
    }

    /// Run a prediction for an existing FASTA file.
    pub async fn run_prediction(&self, fasta_path: &Path) -> Result<PredictionResult, ToolError> {
        if !validate_fasta_file(fasta_path) {
            return Err(ToolError::InvalidFastaFile {
                path: fasta_path.to_path_buf(),
            });
        }

        if self.config.isolate_workdir {
            let workdir = self.isolated_workdir()?;
            let script = self.config.script_path().display().to_string();
            self.run_in(workdir.path(), &script, fasta_path).await
        } else {
            let _guard = self.shared_workdir.lock().await;
            self.run_in(self.config.home(), SCRIPT, fasta_path).await
        }
    }

    /// The prediction command line for `workdir`.
    pub fn prediction_invocation(&self, workdir: &Path, script: &str) -> Invocation {
        self.config
            .env
            .wrap("python", [script])
            .current_dir(workdir)
    }

    async fn run_in(
        &self,
        workdir: &Path,
        script: &str,
        fasta_path: &Path,
    ) -> Result<PredictionResult, ToolError> {
        let input_path = workdir.join(INPUT_DIR).join(INPUT_FILE);
        let output_path = workdir.join(OUTPUT_DIR).join(OUTPUT_FILE);
        let _cleanup = RemoveOnDrop(vec![input_path.clone(), output_path.clone()]);

        let io = ToolError::io(TOOL_NAME);
        tokio::fs::create_dir_all(workdir.join(INPUT_DIR))
            .await
            .map_err(&io)?;
        tokio::fs::create_dir_all(workdir.join(OUTPUT_DIR))
            .await
            .map_err(&io)?;
        tokio::fs::copy(fasta_path, &input_path)
            .await
            .map_err(&io)?;
        // A result left over from an earlier run must not be read as ours.
        match tokio::fs::remove_file(&output_path).await {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => return Err(io(e)),
            _ => {}
        }

        let invocation = self.prediction_invocation(workdir, script);
        info!(
            command = %invocation,
            workdir = %workdir.display(),
            input = %input_path.display(),
            "Running SPIDER prediction"
        );

        let result = self.runner.run(&invocation, self.timeout).await;
        check_output(TOOL_NAME, "prediction", result)?;

        let contents = match tokio::fs::read_to_string(&output_path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ToolError::MissingOutput { tool: TOOL_NAME });
            }
            Err(e) => return Err(io(e)),
        };
        debug!(output = %contents.trim(), "SPIDER output read");

        parse_prediction(&contents)
    }

    /// Scratch directory with `input/`, `output/` and a link to the model files.
    fn isolated_workdir(&self) -> Result<TempDir, ToolError> {
        let io = ToolError::io(TOOL_NAME);
        let workdir = tempfile::Builder::new()
            .prefix("spider_")
            .tempdir()
            .map_err(&io)?;

        std::fs::create_dir(workdir.path().join(INPUT_DIR)).map_err(&io)?;
        std::fs::create_dir(workdir.path().join(OUTPUT_DIR)).map_err(&io)?;
        link_dir(&self.config.model_dir(), &workdir.path().join(MODEL_DIR)).map_err(&io)?;

        debug!(workdir = %workdir.path().display(), "Created isolated SPIDER workdir");
        Ok(workdir)
    }

    pub fn tool_info(&self) -> ToolInfo {
        ToolInfo {
            name: TOOL_NAME.to_string(),
            version: VERSION.to_string(),
            description: DESCRIPTION.to_string(),
            input_format: "FASTA".to_string(),
            output_format: Some("CSV".to_string()),
            home_directory: Some(self.config.home().display().to_string()),
        }
    }
}

#[cfg(unix)]
fn link_dir(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn link_dir(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}
