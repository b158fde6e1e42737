//! Runtime environment activation.
//!
//! Both tools are installed into named micromamba environments. Running a
//! command "inside" one is a pure argv rewrite, kept separate so it can be
//! checked without spawning anything.

use super::runner::Invocation;

/// Default binary used to enter a named environment.
pub const DEFAULT_LAUNCHER: &str = "micromamba";

/// A named isolated runtime environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeEnv {
    launcher: String,
    name: Option<String>,
}

impl RuntimeEnv {
    /// Run commands through `micromamba run -n <name>`.
    pub fn micromamba(name: impl Into<String>) -> Self {
        Self {
            launcher: DEFAULT_LAUNCHER.to_string(),
            name: Some(name.into()),
        }
    }

    /// Run commands directly, without entering an environment.
    pub fn host() -> Self {
        Self {
            launcher: DEFAULT_LAUNCHER.to_string(),
            name: None,
        }
    }

    /// Build from an optional environment name; blank names mean [`RuntimeEnv::host`].
    pub fn from_name(name: Option<String>) -> Self {
        match name.map(|n| n.trim().to_string()) {
            Some(n) if !n.is_empty() => Self::micromamba(n),
            _ => Self::host(),
        }
    }

    pub fn with_launcher(mut self, launcher: impl Into<String>) -> Self {
        self.launcher = launcher.into();
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn launcher(&self) -> &str {
        &self.launcher
    }

    /// Map `program args…` to the final command line for this environment.
    pub fn wrap<I, S>(&self, program: &str, args: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match &self.name {
            Some(name) => {
                let mut argv: Vec<String> = vec![
                    "run".to_string(),
                    "-n".to_string(),
                    name.clone(),
                    program.to_string(),
                ];
                argv.extend(args.into_iter().map(Into::into));
                Invocation::new(self.launcher.clone(), argv)
            }
            None => Invocation::new(program, args),
        }
    }
}
