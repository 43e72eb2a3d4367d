// Configuration loading module
// Reads the connection settings from a .env or YAML file, overlaid by the process environment

use std::collections::HashMap;
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config_validation::validate_settings;
use crate::constants::*;
use crate::error::ToolError;

/// Raw key/value settings before validation
pub type Settings = HashMap<String, String>;

/// Immutable connection configuration shared by every operation
#[derive(Clone, PartialEq, Eq)]
pub struct ToolConfig {
    /// URL registered as the git `origin` remote
    pub git_remote_address: String,

    /// Working directory every external command runs in
    pub git_local_repo_address: PathBuf,

    /// Object-store access key id
    pub minio_root_user: String,

    /// Object-store secret access key
    pub minio_root_password: String,

    /// Recognized but not used by any step
    pub mlflow_bucket_name: Option<String>,

    /// Endpoint URL of the S3-compatible store
    pub mlflow_s3_endpoint_url: String,

    /// Bucket backing the dvc remote
    pub minio_bucket_name_for_dvc: String,
}

impl fmt::Debug for ToolConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolConfig")
            .field("git_remote_address", &self.git_remote_address)
            .field("git_local_repo_address", &self.git_local_repo_address)
            .field("minio_root_user", &self.minio_root_user)
            .field("minio_root_password", &"***")
            .field("mlflow_bucket_name", &self.mlflow_bucket_name)
            .field("mlflow_s3_endpoint_url", &self.mlflow_s3_endpoint_url)
            .field("minio_bucket_name_for_dvc", &self.minio_bucket_name_for_dvc)
            .finish()
    }
}

impl ToolConfig {
    /// Load configuration from a file, letting process environment variables win
    pub fn load(path: &Path) -> Result<Self, ToolError> {
        Self::load_with_vars(path, std::env::vars_os())
    }

    /// Load configuration from a file overlaid by an explicit set of variables
    pub fn load_with_vars<I>(path: &Path, vars: I) -> Result<Self, ToolError>
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut settings = read_settings_file(path)?;
        overlay_settings(&mut settings, vars)?;
        Self::from_settings(&settings)
    }

    /// Build a configuration from already-collected settings
    ///
    /// Fails with [`ToolError::MissingConfig`] naming every absent required key.
    pub fn from_settings(settings: &Settings) -> Result<Self, ToolError> {
        validate_settings(settings)?;

        let required = |key: &str| settings[key].trim().to_string();
        // Credentials may legitimately carry surrounding whitespace
        let verbatim = |key: &str| settings[key].clone();
        let optional = |key: &str| {
            settings
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Ok(Self {
            git_remote_address: required(KEY_GIT_REMOTE_ADDRESS),
            git_local_repo_address: PathBuf::from(required(KEY_GIT_LOCAL_REPO_ADDRESS)),
            minio_root_user: verbatim(KEY_MINIO_ROOT_USER),
            minio_root_password: verbatim(KEY_MINIO_ROOT_PASSWORD),
            mlflow_bucket_name: optional(KEY_MLFLOW_BUCKET_NAME),
            mlflow_s3_endpoint_url: required(KEY_MLFLOW_S3_ENDPOINT_URL),
            minio_bucket_name_for_dvc: required(KEY_MINIO_BUCKET_NAME_FOR_DVC),
        })
    }

    /// `s3://<bucket>` URL for the dvc remote
    pub fn dvc_remote_url(&self) -> String {
        format!("s3://{}", self.minio_bucket_name_for_dvc)
    }
}

/// Read recognized keys from a settings file
///
/// `.yaml`/`.yml` files are parsed as a flat mapping, anything else as dotenv.
/// A missing file yields no settings so the process environment alone can
/// supply the configuration.
pub fn read_settings_file(path: &Path) -> Result<Settings, ToolError> {
    if !path.exists() {
        warn!(path = %path.display(), "configuration file not found, using process environment only");
        return Ok(Settings::new());
    }

    let settings = if is_yaml(path) {
        read_yaml(path)?
    } else {
        read_dotenv(path)?
    };

    debug!(path = %path.display(), keys = settings.len(), "loaded configuration file");
    Ok(settings)
}

/// Overwrite recognized keys with values from `vars`
///
/// Unrelated variables are skipped whatever their encoding; a recognized one
/// whose value is not UTF-8 is an error.
pub fn overlay_settings<I>(settings: &mut Settings, vars: I) -> Result<(), ToolError>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    for (key, value) in vars {
        let Some(key) = RECOGNIZED_KEYS.iter().copied().find(|k| key == **k) else {
            continue;
        };
        let value = value
            .into_string()
            .map_err(|_| ToolError::ConfigEncoding(key))?;
        settings.insert(key.to_string(), value);
    }
    Ok(())
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

fn read_dotenv(path: &Path) -> Result<Settings, ToolError> {
    let to_err = |source| ToolError::ConfigRead {
        path: path.to_path_buf(),
        source,
    };

    let mut settings = Settings::new();
    for item in dotenvy::from_path_iter(path).map_err(to_err)? {
        let (key, value) = item.map_err(to_err)?;
        if RECOGNIZED_KEYS.contains(&key.as_str()) {
            settings.insert(key, value);
        }
    }
    Ok(settings)
}

fn read_yaml(path: &Path) -> Result<Settings, ToolError> {
    let content = fs::read_to_string(path).map_err(|source| ToolError::ConfigIo {
        path: path.to_path_buf(),
        source,
    })?;

    let raw: HashMap<String, serde_yaml::Value> =
        serde_yaml::from_str(&content).map_err(|source| ToolError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

    let mut settings = Settings::new();
    for (key, value) in raw {
        if !RECOGNIZED_KEYS.contains(&key.as_str()) {
            continue;
        }
        let value = match value {
            serde_yaml::Value::String(s) => s,
            serde_yaml::Value::Number(n) => n.to_string(),
            serde_yaml::Value::Bool(b) => b.to_string(),
            _ => continue,
        };
        settings.insert(key, value);
    }
    Ok(settings)
}
