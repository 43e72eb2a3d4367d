// Operations module
// External tool invocations and the publish/init sequencing built on them

pub mod dvc;
pub mod git;
pub mod publish;
pub mod runner;

pub use dvc::DvcOps;
pub use git::GitOps;
pub use publish::{commit_message, default_commit_body, PublishOptions, Publisher};
pub use runner::{CommandOutput, CommandRunner, DryRunRunner, Invocation, ProcessRunner, Step};
