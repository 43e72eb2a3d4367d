// DVC Publish
// Command-line entry point for initializing and publishing git + dvc data repositories

// IMPORTS ------------------>>

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dvc_publish::config_validation::load_and_validate_config;
use dvc_publish::constants::*;
use dvc_publish::{
    CommandRunner, DryRunRunner, ProcessRunner, PublishOptions, Publisher, ToolConfig, ToolError,
};

//--------------------------------------------------------<<

/// Initialize and publish data files tracked by git and dvc
#[derive(Debug, Parser)]
#[command(name = "dvc-publish", version, about)]
struct Cli {
    /// Path to the .env (or .yaml) configuration file
    #[arg(long = "env", global = true, default_value = DEFAULT_ENV_PATH)]
    env: PathBuf,

    /// Echo the captured output of every git/dvc command
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log the commands that would run without running them
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create git and dvc metadata and register their remotes
    Init,

    /// Track files with dvc, commit their pointers, and push both
    Publish {
        /// Data files to track
        #[arg(long, num_args = 1..)]
        files: Vec<String>,

        /// Commit message header, defaults to today's date (yyyymmdd)
        #[arg(long = "msg-header")]
        msg_header: Option<String>,

        /// Commit message body, defaults to a listing of the files
        #[arg(long = "msg-body")]
        msg_body: Option<String>,
    },
}

// ┌──────────────────────────────────────────────────────────────────────────────────────────────────────────────────┐
// │                                                 MAIN ENTRY POINT                                                 │
// └──────────────────────────────────────────────────────────────────────────────────────────────────────────────────┘

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(exit_code_for(&e))
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = load_and_validate_config(&cli.env)
        .with_context(|| format!("Failed to load configuration from {}", cli.env.display()))?;

    let options = PublishOptions {
        verbose: cli.verbose,
        dry_run: cli.dry_run,
    };

    if cli.dry_run {
        dispatch(&config, DryRunRunner, options, cli.command)
    } else {
        dispatch(&config, ProcessRunner, options, cli.command)
    }
}

fn dispatch<R: CommandRunner>(
    config: &ToolConfig,
    runner: R,
    options: PublishOptions,
    command: Commands,
) -> Result<()> {
    let publisher = Publisher::new(config, runner, options);

    match command {
        Commands::Init => {
            publisher.initialize().context("Initialization failed")?;
            info!("initialization complete");
        }
        Commands::Publish {
            files,
            msg_header,
            msg_body,
        } => {
            let header = msg_header.unwrap_or_else(default_header);
            let body = msg_body.filter(|b| !b.is_empty());
            publisher
                .add_and_publish(&files, &header, body.as_deref())
                .context("Publish failed")?;
            info!(files = files.len(), "publish complete");
        }
    }

    Ok(())
}

/// Today's date as the commit header label
fn default_header() -> String {
    chrono::Local::now().format(HEADER_DATE_FORMAT).to_string()
}

/// Exit with the failing tool's own status where there is one
fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<ToolError>()
        .map(|e| u8::try_from(e.exit_code()).unwrap_or(1))
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use dvc_publish::Step;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_publish() {
        let cli = Cli::try_parse_from([
            "dvc-publish",
            "--env",
            "conf/.env",
            "publish",
            "--files",
            "a.csv",
            "b.csv",
            "--msg-header",
            "20240101",
        ])
        .unwrap();

        assert_eq!(cli.env, PathBuf::from("conf/.env"));
        assert!(!cli.verbose);
        match cli.command {
            Commands::Publish {
                files,
                msg_header,
                msg_body,
            } => {
                assert_eq!(files, vec!["a.csv", "b.csv"]);
                assert_eq!(msg_header.as_deref(), Some("20240101"));
                assert_eq!(msg_body, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_init_with_global_flags() {
        let cli = Cli::try_parse_from(["dvc-publish", "init", "-v", "--dry-run"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.dry_run);
        assert_eq!(cli.env, PathBuf::from(DEFAULT_ENV_PATH));
        assert!(matches!(cli.command, Commands::Init));
    }

    #[test]
    fn test_publish_without_files_is_empty_list() {
        let cli = Cli::try_parse_from(["dvc-publish", "publish"]).unwrap();
        match cli.command {
            Commands::Publish { files, .. } => assert!(files.is_empty()),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_default_header_is_date() {
        let header = default_header();
        assert_eq!(header.len(), 8);
        assert!(header.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_exit_code_mapping() {
        let precondition = anyhow::Error::new(ToolError::Precondition("exists".into()))
            .context("Initialization failed");
        assert_eq!(exit_code_for(&precondition), 1);

        let failed = anyhow::Error::new(ToolError::StepFailed {
            step: Step::GitPush,
            code: Some(128),
            detail: String::new(),
        })
        .context("Publish failed");
        assert_eq!(exit_code_for(&failed), 128);

        let out_of_range = anyhow::Error::new(ToolError::StepFailed {
            step: Step::DvcPush,
            code: Some(-1),
            detail: String::new(),
        });
        assert_eq!(exit_code_for(&out_of_range), 1);

        assert_eq!(exit_code_for(&anyhow::anyhow!("other")), 1);
    }
}
