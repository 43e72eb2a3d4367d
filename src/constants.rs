// Application Constants
// Names shared by the CLI, configuration loader, and tool invocations

/// Default configuration file, relative to the current directory
pub const DEFAULT_ENV_PATH: &str = "./.env";

/// Log filter used when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "dvc_publish=info";
pub const VERBOSE_LOG_FILTER: &str = "dvc_publish=debug";

// Configuration keys
pub const KEY_GIT_REMOTE_ADDRESS: &str = "GIT_REMOTE_ADDRESS";
pub const KEY_GIT_LOCAL_REPO_ADDRESS: &str = "GIT_LOCAL_REPO_ADDRESS";
pub const KEY_MINIO_ROOT_USER: &str = "MINIO_ROOT_USER";
pub const KEY_MINIO_ROOT_PASSWORD: &str = "MINIO_ROOT_PASSWORD";
pub const KEY_MLFLOW_BUCKET_NAME: &str = "MLFLOW_BUCKET_NAME";
pub const KEY_MLFLOW_S3_ENDPOINT_URL: &str = "MLFLOW_S3_ENDPOINT_URL";
pub const KEY_MINIO_BUCKET_NAME_FOR_DVC: &str = "MINIO_BUCKET_NAME_FOR_DVC";

/// Keys that must be present before any operation runs
pub const REQUIRED_KEYS: &[&str] = &[
    KEY_GIT_REMOTE_ADDRESS,
    KEY_GIT_LOCAL_REPO_ADDRESS,
    KEY_MINIO_ROOT_USER,
    KEY_MINIO_ROOT_PASSWORD,
    KEY_MLFLOW_S3_ENDPOINT_URL,
    KEY_MINIO_BUCKET_NAME_FOR_DVC,
];

/// Every key the loader recognizes
pub const RECOGNIZED_KEYS: &[&str] = &[
    KEY_GIT_REMOTE_ADDRESS,
    KEY_GIT_LOCAL_REPO_ADDRESS,
    KEY_MINIO_ROOT_USER,
    KEY_MINIO_ROOT_PASSWORD,
    KEY_MLFLOW_BUCKET_NAME,
    KEY_MLFLOW_S3_ENDPOINT_URL,
    KEY_MINIO_BUCKET_NAME_FOR_DVC,
];

// Git
pub const GIT_PROGRAM: &str = "git";
pub const GIT_METADATA_DIR: &str = ".git";
pub const GIT_REMOTE_NAME: &str = "origin";
pub const GIT_BRANCH: &str = "main";

// DVC
pub const DVC_PROGRAM: &str = "dvc";
pub const DVC_METADATA_DIR: &str = ".dvc";
pub const DVC_REMOTE_NAME: &str = "minio";
pub const DVC_POINTER_SUFFIX: &str = ".dvc";

// Commit message template pieces
pub const COMMIT_TITLE_PREFIX: &str = "TYPE: Weekly Add Data : ";
pub const DEFAULT_BODY_HEADING: &str = "add files: \n";

/// Date format for the default commit header
pub const HEADER_DATE_FORMAT: &str = "%Y%m%d";
