//! Subprocess execution for the wrapped tools.
//!
//! This module provides a trait-based abstraction over spawning external
//! commands to enable easy mocking in tests.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;

use async_trait::async_trait;
use miette::Diagnostic;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

#[cfg(test)]
use mockall::automock;

/// Errors that can occur while running an external command.
#[derive(Error, Diagnostic, Debug)]
pub enum RunnerError {
    #[error("Failed to run '{program}': {source}")]
    #[diagnostic(code(biowrap::tools::runner::io))]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command timed out after {}s", .0.as_secs())]
    #[diagnostic(code(biowrap::tools::runner::timed_out))]
    TimedOut(Duration),
}

/// A fully resolved command line, ready to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: Option<PathBuf>,
}

impl Invocation {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            current_dir: None,
        }
    }

    /// Run the command from `dir` instead of the server's working directory.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// The value following `flag` in the argument list, if any.
    #[cfg(test)]
    pub(crate) fn arg_after(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|arg| arg == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Trait for running external commands. Can be mocked in tests.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `invocation` to completion, capturing stdout and stderr.
    ///
    /// A non-zero exit is not an error at this level; callers inspect
    /// `Output::status`.
    async fn run(&self, invocation: &Invocation, timeout: Duration)
    -> Result<Output, RunnerError>;
}

/// Real implementation of CommandRunner using tokio::process::Command.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(
        &self,
        invocation: &Invocation,
        timeout: Duration,
    ) -> Result<Output, RunnerError> {
        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Dropping the wait future on timeout kills the child.
            .kill_on_drop(true);
        if let Some(dir) = &invocation.current_dir {
            command.current_dir(dir);
        }

        debug!(command = %invocation, "Spawning external command");

        let io_error = |source| RunnerError::Io {
            program: invocation.program.clone(),
            source,
        };

        let child = command.spawn().map_err(io_error)?;

        match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(output) => output.map_err(io_error),
            Err(_) => Err(RunnerError::TimedOut(timeout)),
        }
    }
}
