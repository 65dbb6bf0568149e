mod cli_args;
mod setup_command;
mod status;

use std::process::ExitCode;

use clap::Parser;
use dialoguer::Confirm;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::cli_args::{Cli, Command, SetupArgs};
use crate::setup_command::{execute_setup, SetupError};

fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Setup(args) => run_setup(&args),
    }
}

fn run_setup(args: &SetupArgs) -> ExitCode {
    let root = match std::env::current_dir() {
        Ok(root) => root,
        Err(error) => {
            status::error(&format!("Failed resolving the project root: {error}"));
            return ExitCode::FAILURE;
        }
    };

    let mut confirm = |prompt: &str| {
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false)
    };

    match execute_setup(args, &root, &mut confirm) {
        Ok(()) => ExitCode::SUCCESS,
        // The idempotency guard is a notice, not an error, but repeated
        // invocations still exit non-zero.
        Err(error @ SetupError::AlreadyDownloaded) => {
            status::info(&error.to_string());
            ExitCode::FAILURE
        }
        Err(error) => {
            status::error(&error.to_string());
            ExitCode::FAILURE
        }
    }
}
