use anyhow::Result;
use clap::Args;
use tracing::info;

use crate::api::GithubClient;
use crate::config::Config;
use crate::invitations::{fetch_invitations, process};
use crate::prompt;
use crate::state::StateDir;
use crate::stores::{org_prompt, CredentialStore, PreferenceStore, TOKEN_PROMPT};

use super::output::{print_outcome, print_summary};

#[derive(Args, Debug, Default)]
pub struct AcceptArgs {
    /// Organization to accept invitations from (skips the prompt)
    #[arg(short, long)]
    pub org: Option<String>,

    /// Show what would be accepted without accepting anything
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn execute(args: AcceptArgs, config: &Config) -> Result<()> {
    let state = StateDir::new(&config.state.dir)?;
    let credentials = CredentialStore::new(&state);

    let token = credentials.load_or_prompt(|| prompt::secret(TOKEN_PROMPT))?;
    let org = PreferenceStore::new(&state).load_or_prompt(|default| match args.org {
        Some(org) => Ok(org),
        None => prompt::text(&org_prompt(default)),
    })?;
    info!(%org, dry_run = args.dry_run, "accepting invitations");

    let client = GithubClient::new(config, token)?;
    let invitations = fetch_invitations(&client, &credentials).await?;

    println!("Reading invitations:");
    println!("Processing {} invitations", invitations.len());

    let tally = process(&client, &invitations, &org, args.dry_run, print_outcome).await;
    print_summary(&tally);
    info!(total = tally.total(), "finished");

    Ok(())
}
