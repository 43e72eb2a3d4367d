// DVC Operations
// Invocations for the data-versioning half of the publish sequence

use std::path::Path;

use super::runner::{Invocation, Step};
use crate::constants::{DVC_METADATA_DIR, DVC_POINTER_SUFFIX, DVC_PROGRAM, DVC_REMOTE_NAME};

/// DVC invocation builder
pub struct DvcOps;

impl DvcOps {
    /// Check if a path already carries dvc metadata
    pub fn is_initialized(path: &Path) -> bool {
        path.join(DVC_METADATA_DIR).exists()
    }

    /// Pointer file `dvc add` writes next to a tracked file
    pub fn pointer_file(file: &str) -> String {
        format!("{}{}", file, DVC_POINTER_SUFFIX)
    }

    pub fn init() -> Invocation {
        Invocation::new(Step::DvcInit, DVC_PROGRAM, ["init"])
    }

    /// Register the object-store remote as default, replacing any existing one
    pub fn remote_add(url: &str) -> Invocation {
        Invocation::new(
            Step::DvcRemoteAdd,
            DVC_PROGRAM,
            ["remote", "add", "-d", "-f", DVC_REMOTE_NAME, url],
        )
    }

    pub fn remote_endpoint(endpoint_url: &str) -> Invocation {
        Invocation::new(
            Step::DvcEndpoint,
            DVC_PROGRAM,
            ["remote", "modify", DVC_REMOTE_NAME, "endpointurl", endpoint_url],
        )
    }

    /// Credentials go to the untracked local config so they are never committed
    pub fn remote_access_key(user: &str) -> Invocation {
        Invocation::new(
            Step::DvcAccessKey,
            DVC_PROGRAM,
            ["remote", "modify", "--local", DVC_REMOTE_NAME, "access_key_id", user],
        )
    }

    pub fn remote_secret_key(password: &str) -> Invocation {
        Invocation::new(
            Step::DvcSecretKey,
            DVC_PROGRAM,
            [
                "remote",
                "modify",
                "--local",
                DVC_REMOTE_NAME,
                "secret_access_key",
                password,
            ],
        )
        .with_secret_last()
    }

    /// Track a data file, producing its pointer file
    pub fn add(file: &str) -> Invocation {
        Invocation::new(Step::DvcAdd(file.to_string()), DVC_PROGRAM, ["add", file])
    }

    /// Upload tracked payloads to the object store
    pub fn push() -> Invocation {
        Invocation::new(Step::DvcPush, DVC_PROGRAM, ["push"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_file() {
        assert_eq!(DvcOps::pointer_file("data/a.csv"), "data/a.csv.dvc");
    }

    #[test]
    fn test_remote_add_is_default_and_forced() {
        assert_eq!(
            DvcOps::remote_add("s3://dvc").args,
            vec!["remote", "add", "-d", "-f", "minio", "s3://dvc"]
        );
    }

    #[test]
    fn test_secret_key_is_masked() {
        let invocation = DvcOps::remote_secret_key("adminsecretkey");
        assert_eq!(invocation.args.last().map(String::as_str), Some("adminsecretkey"));
        assert!(!invocation.display_line().contains("adminsecretkey"));
    }

    #[test]
    fn test_access_key_written_locally() {
        let invocation = DvcOps::remote_access_key("admin");
        assert!(invocation.args.contains(&"--local".to_string()));
        assert_eq!(invocation.display_line(), "dvc remote modify --local minio access_key_id admin");
    }
}
