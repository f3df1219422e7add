use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pending repository invitation for the authenticated user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invitation {
    pub id: u64,
    #[serde(default)]
    pub node_id: String,
    pub repository: Repository,
    pub inviter: Option<Account>,
    pub permissions: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expired: bool,
    pub html_url: Option<String>,
}

impl Invitation {
    pub fn repo_name(&self) -> &str {
        &self.repository.full_name
    }

    pub fn owner(&self) -> &str {
        &self.repository.owner.login
    }

    pub fn inviter_login(&self) -> Option<&str> {
        self.inviter.as_ref().map(|a| a.login.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub full_name: String,
    pub owner: Account,
}

/// User or organization account, only the login is used
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub login: String,
}
