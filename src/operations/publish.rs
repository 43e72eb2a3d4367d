// Publisher
// Sequences git and dvc invocations for repository setup and data publishing
//
// Neither operation is atomic. The first failing step aborts the sequence and
// whatever state the tools already wrote (a local commit without a push, for
// example) is left in place for the operator to inspect.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use super::dvc::DvcOps;
use super::git::GitOps;
use super::runner::{CommandOutput, CommandRunner, Invocation};
use crate::config::ToolConfig;
use crate::constants::{COMMIT_TITLE_PREFIX, DEFAULT_BODY_HEADING};
use crate::error::ToolError;

/// Options controlling how step output is surfaced
#[derive(Debug, Clone, Default)]
pub struct PublishOptions {
    /// Echo each step's captured stdout
    pub verbose: bool,
    /// Commands are only logged, so nothing may be created on disk
    pub dry_run: bool,
}

/// Drives the external tools against one working directory
pub struct Publisher<'a, R: CommandRunner> {
    config: &'a ToolConfig,
    runner: R,
    options: PublishOptions,
}

impl<'a, R: CommandRunner> Publisher<'a, R> {
    pub fn new(config: &'a ToolConfig, runner: R, options: PublishOptions) -> Self {
        Self {
            config,
            runner,
            options,
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    fn work_dir(&self) -> &Path {
        &self.config.git_local_repo_address
    }

    /// Create git and dvc metadata and register both remotes
    ///
    /// Refuses to run when either metadata directory already exists. A missing
    /// working directory is created first.
    pub fn initialize(&self) -> Result<(), ToolError> {
        let dir = self.work_dir();

        if GitOps::is_repo(dir) {
            return Err(ToolError::Precondition(format!(
                "git metadata already exists in {}, remove it before initializing",
                dir.display()
            )));
        }
        if DvcOps::is_initialized(dir) {
            return Err(ToolError::Precondition(format!(
                "dvc metadata already exists in {}, remove it before initializing",
                dir.display()
            )));
        }

        if !dir.exists() {
            if self.options.dry_run {
                info!(path = %dir.display(), "would create working directory");
            } else {
                fs::create_dir_all(dir).map_err(|source| ToolError::WorkDir {
                    path: dir.to_path_buf(),
                    source,
                })?;
                info!(path = %dir.display(), "created working directory");
            }
        }

        self.execute(&GitOps::init())?;
        self.execute(&GitOps::remote_add(&self.config.git_remote_address))?;
        info!("git repository initialized");

        self.execute(&DvcOps::init())?;
        self.execute(&DvcOps::remote_add(&self.config.dvc_remote_url()))?;
        self.execute(&DvcOps::remote_endpoint(&self.config.mlflow_s3_endpoint_url))?;
        self.execute(&DvcOps::remote_access_key(&self.config.minio_root_user))?;
        self.execute(&DvcOps::remote_secret_key(&self.config.minio_root_password))?;
        info!("dvc remote configured");

        Ok(())
    }

    /// Track, commit, and push a batch of data files
    ///
    /// Order: dvc add (each file), git add of each pointer, one commit,
    /// git push, dvc push. `body` defaults to a listing of `files`.
    pub fn add_and_publish(
        &self,
        files: &[String],
        header: &str,
        body: Option<&str>,
    ) -> Result<(), ToolError> {
        let dir = self.work_dir();
        if !GitOps::is_repo(dir) {
            return Err(ToolError::Precondition(format!(
                "{} is not a git repository, run init first",
                dir.display()
            )));
        }

        for file in files {
            self.execute(&DvcOps::add(file))?;
            info!(file = %file, "dvc add complete");
        }

        for file in files {
            let pointer = DvcOps::pointer_file(file);
            self.execute(&GitOps::add(&pointer))?;
            info!(file = %pointer, "git add complete");
        }

        let message = commit_message(header, body, files);
        self.execute(&GitOps::commit(&message, files.is_empty()))?;
        info!("git commit complete");

        self.execute(&GitOps::push())?;
        info!("git push complete");

        info!("dvc pushing ...");
        self.execute(&DvcOps::push())?;
        info!("dvc push complete");

        Ok(())
    }

    /// Run one invocation and turn a non-zero exit into an error
    fn execute(&self, invocation: &Invocation) -> Result<CommandOutput, ToolError> {
        let output = self.runner.run(invocation, self.work_dir())?;

        if self.options.verbose && !output.stdout.trim().is_empty() {
            println!("{}", output.stdout.trim_end());
        }

        if !output.is_success() {
            // git reports "nothing to commit" on stdout
            let detail = match output.stderr.trim() {
                "" => output.stdout.trim(),
                stderr => stderr,
            };
            return Err(ToolError::StepFailed {
                step: invocation.step.clone(),
                code: output.code,
                detail: detail.to_string(),
            });
        }

        debug!(step = %invocation.step, "step succeeded");
        Ok(output)
    }
}

/// Default commit body listing every file on its own line
pub fn default_commit_body(files: &[String]) -> String {
    let mut body = String::from(DEFAULT_BODY_HEADING);
    for file in files {
        body.push_str(file);
        body.push('\n');
    }
    body
}

/// Full commit message from a header label and optional body
pub fn commit_message(header: &str, body: Option<&str>, files: &[String]) -> String {
    let body = match body {
        Some(body) => body.to_string(),
        None => default_commit_body(files),
    };
    format!("{}{} \n{}", COMMIT_TITLE_PREFIX, header, body)
}
