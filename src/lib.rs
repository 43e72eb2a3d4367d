// DVC Publish Library
// Initializes git + dvc tracked data repositories and publishes data files to them

// Configuration - loading and validation of connection settings
pub mod config;
pub mod config_validation;

// Operations - external tool invocations and their sequencing
pub mod operations;

// Error taxonomy
pub mod error;

// Application constants
pub mod constants;

// Re-export commonly used items for convenience
pub use config::ToolConfig;
pub use error::ToolError;
pub use operations::{CommandRunner, DryRunRunner, ProcessRunner, PublishOptions, Publisher, Step};
