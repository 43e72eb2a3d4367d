// Command Runner
// Seam between the publisher and the external git/dvc processes

use std::fmt;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::error::ToolError;

/// Identity of one external invocation in a publish or init sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    GitInit,
    GitRemoteAdd,
    DvcInit,
    DvcRemoteAdd,
    DvcEndpoint,
    DvcAccessKey,
    DvcSecretKey,
    DvcAdd(String),
    GitAdd(String),
    GitCommit,
    GitPush,
    DvcPush,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::GitInit => write!(f, "git init"),
            Step::GitRemoteAdd => write!(f, "git remote add"),
            Step::DvcInit => write!(f, "dvc init"),
            Step::DvcRemoteAdd => write!(f, "dvc remote add"),
            Step::DvcEndpoint => write!(f, "dvc remote modify endpointurl"),
            Step::DvcAccessKey => write!(f, "dvc remote modify access_key_id"),
            Step::DvcSecretKey => write!(f, "dvc remote modify secret_access_key"),
            Step::DvcAdd(file) => write!(f, "dvc add {}", file),
            Step::GitAdd(file) => write!(f, "git add {}", file),
            Step::GitCommit => write!(f, "git commit"),
            Step::GitPush => write!(f, "git push"),
            Step::DvcPush => write!(f, "dvc push"),
        }
    }
}

/// A fully described external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub step: Step,
    pub program: &'static str,
    pub args: Vec<String>,
    /// Index into `args` of a value that must not be logged
    pub secret_arg: Option<usize>,
}

impl Invocation {
    pub fn new<I, S>(step: Step, program: &'static str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            step,
            program,
            args: args.into_iter().map(Into::into).collect(),
            secret_arg: None,
        }
    }

    /// Mark the last argument as secret
    pub fn with_secret_last(mut self) -> Self {
        self.secret_arg = self.args.len().checked_sub(1);
        self
    }

    /// Command line suitable for logs, with secrets masked
    pub fn display_line(&self) -> String {
        let mut line = String::from(self.program);
        for (i, arg) in self.args.iter().enumerate() {
            line.push(' ');
            if Some(i) == self.secret_arg {
                line.push_str("***");
            } else {
                line.push_str(arg);
            }
        }
        line
    }
}

/// Captured result of an external command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success() -> Self {
        Self {
            code: Some(0),
            ..Self::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Executes invocations inside a working directory
///
/// Implementations return `Err` only when the program could not be run at all;
/// a non-zero exit is reported through [`CommandOutput`] for the caller to inspect.
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation, cwd: &Path) -> Result<CommandOutput, ToolError>;
}

/// Runs invocations as blocking child processes
#[derive(Debug, Default, Clone)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, invocation: &Invocation, cwd: &Path) -> Result<CommandOutput, ToolError> {
        debug!(cwd = %cwd.display(), "spawning {}", invocation.display_line());

        let output = Command::new(invocation.program)
            .args(&invocation.args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ToolError::Spawn {
                step: invocation.step.clone(),
                source,
            })?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Logs what would run and reports success without spawning anything
#[derive(Debug, Default, Clone)]
pub struct DryRunRunner;

impl CommandRunner for DryRunRunner {
    fn run(&self, invocation: &Invocation, cwd: &Path) -> Result<CommandOutput, ToolError> {
        info!(cwd = %cwd.display(), "would run: {}", invocation.display_line());
        Ok(CommandOutput::success())
    }
}
