//! BLASTp service configuration.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::tools::config::{env_flag, env_string, runtime_env_from};
use crate::tools::{ConfigError, RuntimeEnv, ensure_writable_dir};

pub const DB_PATH_ENV: &str = "BLAST_DB_PATH";
pub const MM_ENV_ENV: &str = "BLAST_MM_ENV";
pub const OUTPUT_PATH_ENV: &str = "BLAST_OUTPUT_PATH";
pub const AUTO_UPDATE_ENV: &str = "AUTO_UPDATE";

pub const DEFAULT_MM_ENV: &str = "blast";
pub const DEFAULT_OUTPUT_DIR: &str = "blast_output";

/// Where BLASTp finds its databases and writes its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlastpConfig {
    pub db_path: PathBuf,
    pub output_dir: PathBuf,
    pub env: RuntimeEnv,
    pub auto_update: bool,
}

impl BlastpConfig {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            env: RuntimeEnv::micromamba(DEFAULT_MM_ENV),
            auto_update: false,
        }
    }

    /// Read the configuration from the environment.
    ///
    /// `BLAST_DB_PATH` is required.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_or(None)
    }

    /// Like [`BlastpConfig::from_env`], with `db_path` taking precedence over
    /// `BLAST_DB_PATH` when given.
    pub fn from_env_or(db_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let db_path = db_path
            .or_else(|| env_string(DB_PATH_ENV).map(PathBuf::from))
            .ok_or(ConfigError::MissingDbPath)?;

        let output_dir = env_string(OUTPUT_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        Ok(Self {
            db_path,
            output_dir,
            env: runtime_env_from(MM_ENV_ENV, DEFAULT_MM_ENV),
            auto_update: env_flag(AUTO_UPDATE_ENV),
        })
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_env(mut self, env: RuntimeEnv) -> Self {
        self.env = env;
        self
    }

    pub fn with_auto_update(mut self, auto_update: bool) -> Self {
        self.auto_update = auto_update;
        self
    }

    /// Full database path for `db_name`.
    pub fn database(&self, db_name: &str) -> PathBuf {
        self.db_path.join(db_name)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Validate storage at startup: the database directory must be writable and
    /// the output directory must exist.
    pub fn prepare(&self) -> Result<(), ConfigError> {
        ensure_writable_dir(&self.db_path)?;
        ensure_writable_dir(&self.output_dir)?;

        info!(
            db_path = %self.db_path.display(),
            output_dir = %self.output_dir.display(),
            env = ?self.env.name(),
            auto_update = self.auto_update,
            "BLASTp configuration ready"
        );
        Ok(())
    }
}
