#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod commands;
mod config;
mod telemetry;

use std::process;

use clap::Parser;
use ghmodels::ModelsClient;

use crate::config::{Cli, Command};

/// Tracing target for command execution.
pub const TRACING_TARGET_CLI: &str = "ghmodels_cli";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        process::exit(0);
    };

    let report = commands::error_report(&error);
    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_CLI,
            error = %report,
            "command failed"
        );
    } else {
        eprintln!("Error: {report}");
    }

    process::exit(1);
}

async fn run() -> anyhow::Result<()> {
    #[cfg(feature = "dotenv")]
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    telemetry::init_tracing()?;

    let client = ModelsClient::with_config(cli.token, cli.client)?;

    match cli.command {
        Command::Models(args) => commands::list_models(&client, &args).await,
        Command::Chat(args) => commands::chat(&client, &args).await,
    }
}
