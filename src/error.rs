// Error Types
// Failure taxonomy for configuration loading and external tool orchestration

use std::path::PathBuf;

use crate::operations::Step;

/// Errors surfaced by the publisher and its configuration layer
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// The working directory is not in the state the operation requires
    #[error("Precondition violated: {0}")]
    Precondition(String),

    /// One or more required configuration keys are absent or blank
    #[error("Missing configuration: {}", .0.join(", "))]
    MissingConfig(Vec<&'static str>),

    #[error("Failed to read configuration file {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error("Failed to read configuration file {path}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A recognized environment variable holds bytes that are not UTF-8
    #[error("Configuration value for {0} is not valid UTF-8")]
    ConfigEncoding(&'static str),

    #[error("Failed to create working directory {path}")]
    WorkDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The external tool could not be started at all
    #[error("Failed to spawn `{step}`")]
    Spawn {
        step: Step,
        #[source]
        source: std::io::Error,
    },

    /// The external tool ran and exited unsuccessfully
    /// `detail` is the tool's stderr, or its stdout when stderr was empty
    #[error("Step `{step}` failed (exit code {}): {detail}", display_code(.code))]
    StepFailed {
        step: Step,
        code: Option<i32>,
        detail: String,
    },
}

fn display_code(code: &Option<i32>) -> String {
    code.map(|c| c.to_string())
        .unwrap_or_else(|| "none".to_string())
}

impl ToolError {
    /// Process exit code the binary should terminate with for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ToolError::StepFailed { code: Some(code), .. } if *code != 0 => *code,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_lists_every_key() {
        let err = ToolError::MissingConfig(vec!["GIT_REMOTE_ADDRESS", "MINIO_ROOT_USER"]);
        assert_eq!(
            err.to_string(),
            "Missing configuration: GIT_REMOTE_ADDRESS, MINIO_ROOT_USER"
        );
    }

    #[test]
    fn test_step_failure_exit_code_passthrough() {
        let err = ToolError::StepFailed {
            step: Step::DvcPush,
            code: Some(255),
            detail: "unable to reach remote".to_string(),
        };
        assert_eq!(err.exit_code(), 255);
        assert_eq!(
            err.to_string(),
            "Step `dvc push` failed (exit code 255): unable to reach remote"
        );
    }

    #[test]
    fn test_signal_killed_step_exits_one() {
        let err = ToolError::StepFailed {
            step: Step::GitCommit,
            code: None,
            detail: String::new(),
        };
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("exit code none"));
    }

    #[test]
    fn test_precondition_exits_one() {
        let err = ToolError::Precondition("git metadata already exists".to_string());
        assert_eq!(err.exit_code(), 1);
    }
}
