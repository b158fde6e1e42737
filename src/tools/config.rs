//! Shared configuration helpers.
//!
//! Precedence everywhere: CLI flag > environment variable > default.

use std::env;
use std::path::Path;

use tracing::info;

use super::env::{DEFAULT_LAUNCHER, RuntimeEnv};
use super::error::ConfigError;

/// Environment variable overriding the environment launcher binary.
pub const LAUNCHER_ENV: &str = "MICROMAMBA_BIN";

/// Read a non-empty environment variable.
pub(crate) fn env_string(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Read a boolean flag; only a case-insensitive "true" enables it.
pub(crate) fn env_flag(name: &str) -> bool {
    env_string(name).is_some_and(|value| value.trim().eq_ignore_ascii_case("true"))
}

/// Runtime environment named by `name_var`, falling back to `default_name`.
pub(crate) fn runtime_env_from(name_var: &str, default_name: &str) -> RuntimeEnv {
    let name = env::var(name_var).unwrap_or_else(|_| default_name.to_string());
    let launcher = env_string(LAUNCHER_ENV).unwrap_or_else(|| DEFAULT_LAUNCHER.to_string());
    RuntimeEnv::from_name(Some(name)).with_launcher(launcher)
}

/// Create `path` if needed and prove it is writable with a scratch file.
pub fn ensure_writable_dir(path: &Path) -> Result<(), ConfigError> {
    let not_writable = |source| ConfigError::NotWritable {
        path: path.to_path_buf(),
        source,
    };

    std::fs::create_dir_all(path).map_err(not_writable)?;
    tempfile::Builder::new()
        .prefix(".write_probe")
        .tempfile_in(path)
        .map_err(not_writable)?;

    info!(path = %path.display(), "Directory is writable");
    Ok(())
}
