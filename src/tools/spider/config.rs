//! SPIDER service configuration.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::tools::config::{env_flag, env_string, runtime_env_from};
use crate::tools::{ConfigError, RuntimeEnv, ensure_writable_dir};

pub const HOME_ENV: &str = "SPIDER_HOME";
pub const MM_ENV_ENV: &str = "SPIDER_MM_ENV";
pub const ISOLATE_ENV: &str = "SPIDER_ISOLATE_WORKDIR";

pub const DEFAULT_HOME: &str = "/app/spider_tool";
pub const DEFAULT_MM_ENV: &str = "spider";

pub const SCRIPT: &str = "spider.py";
pub const INPUT_DIR: &str = "input";
pub const OUTPUT_DIR: &str = "output";
pub const MODEL_DIR: &str = "model";
pub const INPUT_FILE: &str = "seq.fasta";
pub const OUTPUT_FILE: &str = "predict_result.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpiderConfig {
    pub home: PathBuf,
    pub env: RuntimeEnv,
    /// Run each prediction in its own temporary working directory.
    pub isolate_workdir: bool,
}

impl SpiderConfig {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            env: RuntimeEnv::micromamba(DEFAULT_MM_ENV),
            isolate_workdir: false,
        }
    }

    pub fn from_env() -> Self {
        Self::from_env_or(None)
    }

    /// Read the configuration from the environment, preferring `home` when given.
    pub fn from_env_or(home: Option<PathBuf>) -> Self {
        let home = home
            .or_else(|| env_string(HOME_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HOME));

        Self {
            home,
            env: runtime_env_from(MM_ENV_ENV, DEFAULT_MM_ENV),
            isolate_workdir: env_flag(ISOLATE_ENV),
        }
    }

    pub fn with_env(mut self, env: RuntimeEnv) -> Self {
        self.env = env;
        self
    }

    pub fn with_isolate_workdir(mut self, isolate_workdir: bool) -> Self {
        self.isolate_workdir = isolate_workdir;
        self
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn input_dir(&self) -> PathBuf {
        self.home.join(INPUT_DIR)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.home.join(OUTPUT_DIR)
    }

    pub fn model_dir(&self) -> PathBuf {
        self.home.join(MODEL_DIR)
    }

    pub fn script_path(&self) -> PathBuf {
        self.home.join(SCRIPT)
    }

    /// Check the home directory exists and create the shared input/output
    /// directories.
    pub fn prepare(&self) -> Result<(), ConfigError> {
        if !self.home.is_dir() {
            return Err(ConfigError::MissingToolHome {
                path: self.home.clone(),
            });
        }

        if !self.isolate_workdir {
            ensure_writable_dir(&self.input_dir())?;
            ensure_writable_dir(&self.output_dir())?;
        }

        info!(
            home = %self.home.display(),
            env = ?self.env.name(),
            isolate_workdir = self.isolate_workdir,
            "SPIDER configuration ready"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::LAUNCHER_ENV;
    use serial_test::serial;
    use std::env;
    use tempfile::TempDir;

    fn clear_env() {
        for var in [HOME_ENV, MM_ENV_ENV, ISOLATE_ENV, LAUNCHER_ENV] {
            unsafe {
                env::remove_var(var);
            }
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();

        let config = SpiderConfig::from_env();

        assert_eq!(config.home, PathBuf::from("/app/spider_tool"));
        assert_eq!(config.env, RuntimeEnv::micromamba("spider"));
        assert!(!config.isolate_workdir);
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        unsafe {
            env::set_var(HOME_ENV, "/opt/spider");
            env::set_var(MM_ENV_ENV, "spider-py39");
            env::set_var(ISOLATE_ENV, "true");
        }

        let config = SpiderConfig::from_env();
        assert_eq!(config.home, PathBuf::from("/opt/spider"));
        assert_eq!(config.env.name(), Some("spider-py39"));
        assert!(config.isolate_workdir);

        let config = SpiderConfig::from_env_or(Some(PathBuf::from("/srv/spider")));
        assert_eq!(config.home, PathBuf::from("/srv/spider"));

        clear_env();
    }

    #[test]
    fn test_prepare_missing_home() {
        let temp_dir = TempDir::new().unwrap();
        let err = SpiderConfig::new(temp_dir.path().join("missing"))
            .prepare()
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingToolHome { .. }));
    }

    #[test]
    fn test_prepare_creates_shared_directories() {
        let temp_dir = TempDir::new().unwrap();
        let config = SpiderConfig::new(temp_dir.path());

        config.prepare().unwrap();

        assert!(config.input_dir().is_dir());
        assert!(config.output_dir().is_dir());
    }
}
