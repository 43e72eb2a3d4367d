// Git Operations
// Invocations for the source-control half of the publish sequence

use std::path::Path;

use super::runner::{Invocation, Step};
use crate::constants::{GIT_BRANCH, GIT_METADATA_DIR, GIT_PROGRAM, GIT_REMOTE_NAME};

/// Git invocation builder
pub struct GitOps;

impl GitOps {
    /// Check if a path is a git repository
    pub fn is_repo(path: &Path) -> bool {
        path.join(GIT_METADATA_DIR).exists()
    }

    /// Initialize a repository on the main branch
    pub fn init() -> Invocation {
        Invocation::new(
            Step::GitInit,
            GIT_PROGRAM,
            ["init".to_string(), format!("--initial-branch={}", GIT_BRANCH)],
        )
    }

    /// Register `url` as the origin remote
    pub fn remote_add(url: &str) -> Invocation {
        Invocation::new(
            Step::GitRemoteAdd,
            GIT_PROGRAM,
            ["remote", "add", GIT_REMOTE_NAME, url],
        )
    }

    /// Stage a file
    pub fn add(file: &str) -> Invocation {
        Invocation::new(Step::GitAdd(file.to_string()), GIT_PROGRAM, ["add", file])
    }

    /// Commit staged changes
    ///
    /// `allow_empty` lets a publish with no files still record a commit.
    pub fn commit(message: &str, allow_empty: bool) -> Invocation {
        let mut args = vec!["commit", "-m", message];
        if allow_empty {
            args.push("--allow-empty");
        }
        Invocation::new(Step::GitCommit, GIT_PROGRAM, args)
    }

    /// Push main to origin and set upstream
    pub fn push() -> Invocation {
        Invocation::new(
            Step::GitPush,
            GIT_PROGRAM,
            ["push", "-u", GIT_REMOTE_NAME, GIT_BRANCH],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_repo() {
        let dir = TempDir::new().unwrap();
        assert!(!GitOps::is_repo(dir.path()));

        std::fs::create_dir(dir.path().join(".git")).unwrap();
        assert!(GitOps::is_repo(dir.path()));
    }

    #[test]
    fn test_commit_args() {
        let commit = GitOps::commit("msg", false);
        assert_eq!(commit.args, vec!["commit", "-m", "msg"]);

        let empty = GitOps::commit("msg", true);
        assert_eq!(empty.args, vec!["commit", "-m", "msg", "--allow-empty"]);
    }

    #[test]
    fn test_push_targets_origin_main() {
        assert_eq!(GitOps::push().args, vec!["push", "-u", "origin", "main"]);
    }

    #[test]
    fn test_init_uses_main_branch() {
        assert_eq!(GitOps::init().args, vec!["init", "--initial-branch=main"]);
    }
}
