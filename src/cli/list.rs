use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::api::GithubClient;
use crate::config::Config;
use crate::invitations::fetch_invitations;
use crate::prompt;
use crate::state::StateDir;
use crate::stores::{CredentialStore, TOKEN_PROMPT};
use crate::types::Invitation;

use super::output::{print_info, print_output};
use super::OutputFormat;

#[derive(Args, Debug)]
pub struct ListCommand {
    /// Only show invitations from this organization
    #[arg(short, long)]
    pub org: Option<String>,
}

#[derive(Debug, Serialize, Tabled)]
struct InvitationRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Repository")]
    repository: String,
    #[tabled(rename = "Owner")]
    owner: String,
    #[tabled(rename = "Inviter")]
    inviter: String,
    #[tabled(rename = "Permission")]
    permission: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Expired")]
    expired: bool,
    #[tabled(rename = "URL")]
    url: String,
}

impl From<&Invitation> for InvitationRow {
    fn from(invitation: &Invitation) -> Self {
        Self {
            id: invitation.id,
            repository: invitation.repo_name().to_string(),
            owner: invitation.owner().to_string(),
            inviter: invitation.inviter_login().unwrap_or("-").to_string(),
            permission: invitation.permissions.clone().unwrap_or_default(),
            created: invitation
                .created_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
            expired: invitation.expired,
            url: invitation.html_url.clone().unwrap_or_default(),
        }
    }
}

pub async fn execute(cmd: ListCommand, config: &Config, format: OutputFormat) -> Result<()> {
    let state = StateDir::new(&config.state.dir)?;
    let credentials = CredentialStore::new(&state);
    let token = credentials.load_or_prompt(|| prompt::secret(TOKEN_PROMPT))?;

    let client = GithubClient::new(config, token)?;
    let invitations = fetch_invitations(&client, &credentials).await?;

    let rows: Vec<InvitationRow> = invitations
        .iter()
        .filter(|inv| cmd.org.as_deref().map_or(true, |org| inv.owner() == org))
        .map(InvitationRow::from)
        .collect();

    if rows.is_empty() && matches!(format, OutputFormat::Table) {
        print_info("No pending invitations");
        return Ok(());
    }

    print_output(&rows, format)
}
