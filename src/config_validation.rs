// Configuration validation module

use std::path::Path;

use tracing::{error, info};

use crate::config::{Settings, ToolConfig};
use crate::constants::REQUIRED_KEYS;
use crate::error::ToolError;

/// Check that every required key is present and non-blank
pub fn validate_settings(settings: &Settings) -> Result<(), ToolError> {
    let missing: Vec<&'static str> = REQUIRED_KEYS
        .iter()
        .copied()
        .filter(|key| {
            settings
                .get(*key)
                .map(|value| value.trim().is_empty())
                .unwrap_or(true)
        })
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ToolError::MissingConfig(missing))
    }
}

/// Load and validate configuration, logging the outcome
pub fn load_and_validate_config(path: &Path) -> Result<ToolConfig, ToolError> {
    match ToolConfig::load(path) {
        Ok(config) => {
            info!(
                repo = %config.git_local_repo_address.display(),
                remote = %config.git_remote_address,
                "configuration loaded"
            );
            Ok(config)
        }
        Err(e) => {
            error!(path = %path.display(), "failed to load configuration: {}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;

    #[test]
    fn test_all_keys_missing() {
        let err = validate_settings(&Settings::new()).unwrap_err();
        match err {
            ToolError::MissingConfig(keys) => assert_eq!(keys, REQUIRED_KEYS.to_vec()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let mut settings: Settings = REQUIRED_KEYS
            .iter()
            .map(|k| (k.to_string(), "value".to_string()))
            .collect();
        settings.insert(KEY_MINIO_ROOT_PASSWORD.to_string(), "   ".to_string());

        let err = validate_settings(&settings).unwrap_err();
        match err {
            ToolError::MissingConfig(keys) => assert_eq!(keys, vec![KEY_MINIO_ROOT_PASSWORD]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_optional_bucket_not_required() {
        let settings: Settings = REQUIRED_KEYS
            .iter()
            .map(|k| (k.to_string(), "value".to_string()))
            .collect();
        assert!(!settings.contains_key(KEY_MLFLOW_BUCKET_NAME));
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_load_and_validate_complete_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("publish.env");
        std::fs::write(
            &path,
            "GIT_REMOTE_ADDRESS=git@example.com:team/data.git\n\
             GIT_LOCAL_REPO_ADDRESS=/srv/data\n\
             MINIO_ROOT_USER=admin\n\
             MINIO_ROOT_PASSWORD=adminsecretkey\n\
             MLFLOW_S3_ENDPOINT_URL=http://minio.local:9000\n\
             MINIO_BUCKET_NAME_FOR_DVC=dvc\n",
        )
        .unwrap();

        let config = load_and_validate_config(&path).unwrap();
        assert!(!config.minio_bucket_name_for_dvc.is_empty());
        assert!(!config.minio_root_password.is_empty());
    }
}
