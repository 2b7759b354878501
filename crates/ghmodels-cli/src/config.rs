//! Command-line arguments.

use clap::{Args, Parser, Subcommand};
use ghmodels::ClientConfig;

/// Command-line interface for the GitHub Models API.
#[derive(Debug, Parser)]
#[command(name = "ghmodels", version, about)]
pub struct Cli {
    /// Token sent as a bearer credential
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,

    #[command(flatten)]
    pub client: ClientConfig,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the models in the catalog
    Models(ModelsArgs),
    /// Send a single chat completion request
    Chat(ChatArgs),
}

#[derive(Debug, Args)]
pub struct ModelsArgs {
    /// Print the catalog as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ChatArgs {
    /// Model identifier, e.g. openai/gpt-4.1
    #[arg(long, short)]
    pub model: String,

    /// Optional system prompt sent before the user message
    #[arg(long, short)]
    pub system: Option<String>,

    /// Send the request through this organization's endpoint
    #[arg(long)]
    pub org: Option<String>,

    /// User message
    pub prompt: String,
}
