//! External tool services.
//!
//! Each wrapped command-line tool gets one service that owns argument
//! construction, subprocess invocation and output parsing:
//!
//! - **blastp**: protein alignment search against a named database
//! - **spider**: protein druggability prediction
//!
//! Services are generic over `R: CommandRunner` so tests can swap in a mock
//! runner instead of the real binaries.

pub mod blastp;
mod config;
mod env;
mod error;
mod info;
mod registry;
mod runner;
pub mod spider;

#[cfg(test)]
pub(crate) mod test_support;

use std::process::Output;
use std::time::Duration;

use tracing::error;

pub use config::{LAUNCHER_ENV, ensure_writable_dir};
pub use env::{DEFAULT_LAUNCHER, RuntimeEnv};
pub use error::{ConfigError, ToolError};
pub use info::ToolInfo;
#[cfg(test)]
pub use runner::MockCommandRunner;
pub use registry::DatabaseRegistry;
pub use runner::{CommandRunner, Invocation, ProcessRunner, RunnerError};

/// Hard limit for a single tool run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Turn a raw runner result into a successful output or a tool error.
///
/// Timeouts, launch failures and non-zero exits stay distinct so callers can
/// report them differently.
pub(crate) fn check_output(
    tool: &'static str,
    operation: &'static str,
    result: Result<Output, RunnerError>,
) -> Result<Output, ToolError> {
    let output = match result {
        Ok(output) => output,
        Err(RunnerError::TimedOut(after)) => {
            error!(tool, operation, timeout_secs = after.as_secs(), "Tool timed out");
            return Err(ToolError::TimedOut { tool, operation });
        }
        Err(source) => {
            error!(tool, operation, "Failed to launch tool: {}", source);
            return Err(ToolError::Launch { tool, source });
        }
    };

    if output.status.success() {
        return Ok(output);
    }

    let stderr = String::from_utf8_lossy(&output.stderr).trim_end().to_string();
    let err = ToolError::ExecutionFailed {
        tool,
        code: output.status.code(),
        stderr,
    };
    error!(tool, operation, "{}", err);
    Err(err)
}
