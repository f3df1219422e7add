pub mod accept;
pub mod completions;
pub mod list;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Accept all pending GitHub repository invitations from one organization
#[derive(Parser, Debug)]
#[command(name = "invite-accept")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "INVITE_ACCEPT_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Directory holding the stored token and last organization
    #[arg(long, env = "INVITE_ACCEPT_STATE_DIR", global = true)]
    pub state_dir: Option<PathBuf>,

    #[command(flatten)]
    pub accept: accept::AcceptArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Accept invitations from one organization (default)
    Accept(accept::AcceptArgs),

    /// List pending invitations without accepting them
    List(list::ListCommand),

    /// Generate shell completions
    Completions(completions::CompletionsCommand),
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Table output (best for humans)
    #[default]
    Table,
    /// Plain output (minimal, for scripting)
    Plain,
}
