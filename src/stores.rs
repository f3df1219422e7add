//! Credential and organization values kept in the state directory.
//!
//! Resolution is split from persistence: `resolve_token` and `resolve_org`
//! only decide the value, given what was stored and a prompt callback. The
//! store types wire them to their files.

use anyhow::Result;
use tracing::debug;

use crate::error::AppError;
use crate::state::{StateDir, StateFile, LAST_ORG_FILE, TOKEN_FILE};

pub const TOKEN_PROMPT: &str = "Paste your github token (should have all privileges assigned)";

/// Prompt text for the organization, showing the stored default
pub fn org_prompt(default: &str) -> String {
    format!("Org name to accept invitations from [{}]", default)
}

/// Use the stored token, or ask for one when there is none.
///
/// Returns the token and whether it came from the prompt.
pub fn resolve_token<F>(stored: Option<String>, prompt: F) -> Result<(String, bool)>
where
    F: FnOnce() -> Result<String>,
{
    match stored.filter(|t| !t.trim().is_empty()) {
        Some(token) => Ok((token.trim().to_string(), false)),
        None => Ok((prompt()?.trim().to_string(), true)),
    }
}

/// Ask for an organization, falling back to `previous` on an empty answer.
pub fn resolve_org<F>(previous: Option<&str>, prompt: F) -> Result<String>
where
    F: FnOnce(&str) -> Result<String>,
{
    let default = previous.unwrap_or("").trim();
    let answer = prompt(default)?;
    let answer = answer.trim();
    if answer.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(answer.to_string())
    }
}

/// Token file backed credential store
pub struct CredentialStore {
    file: StateFile,
}

impl CredentialStore {
    pub fn new(state: &StateDir) -> Self {
        Self {
            file: state.file(TOKEN_FILE),
        }
    }

    /// Load the token, prompting and saving a fresh one if the file is missing or blank
    pub fn load_or_prompt<F>(&self, prompt: F) -> Result<String>
    where
        F: FnOnce() -> Result<String>,
    {
        let (token, prompted) = resolve_token(self.file.load()?, prompt)?;
        if token.is_empty() {
            return Err(AppError::MissingToken.into());
        }
        if prompted {
            self.file.save(&token)?;
            debug!(path = ?self.file.path(), "saved token");
        }
        Ok(token)
    }

    /// Remove the stored token so the next run asks again
    pub fn forget(&self) -> Result<()> {
        debug!(path = ?self.file.path(), "removing stored token");
        self.file.delete()
    }
}

/// Last-used organization store
pub struct PreferenceStore {
    file: StateFile,
}

impl PreferenceStore {
    pub fn new(state: &StateDir) -> Self {
        Self {
            file: state.file(LAST_ORG_FILE),
        }
    }

    /// Resolve the organization against the stored default and save the result
    pub fn load_or_prompt<F>(&self, prompt: F) -> Result<String>
    where
        F: FnOnce(&str) -> Result<String>,
    {
        let previous = self.file.load()?;
        let org = resolve_org(previous.as_deref(), prompt)?;
        self.file.save(&org)?;
        if org.is_empty() {
            return Err(AppError::MissingOrganization.into());
        }
        Ok(org)
    }
}
