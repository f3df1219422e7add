//! Fetching and accepting invitations for a single organization.

use anyhow::Result;
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::api::{InvitationApi, PAGE_SIZE};
use crate::error::AppError;
use crate::stores::CredentialStore;
use crate::types::Invitation;

/// What happened to one invitation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Accepted,
    AlreadyAccepted,
    Expired,
    /// Any other response status from the accept call
    Rejected(StatusCode),
    /// The accept call never got a response
    Unreachable(String),
    /// Repository belongs to a different owner
    OtherOwner,
    /// Would have been accepted, but this is a dry run
    WouldAccept,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Success,
    Skipped,
    Failed,
}

impl Outcome {
    /// Map an accept response status to an outcome
    pub fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            204 => Outcome::Accepted,
            304 => Outcome::AlreadyAccepted,
            404 => Outcome::Expired,
            _ => Outcome::Rejected(status),
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Outcome::Accepted => Category::Success,
            Outcome::AlreadyAccepted | Outcome::OtherOwner | Outcome::WouldAccept => {
                Category::Skipped
            }
            Outcome::Expired | Outcome::Rejected(_) | Outcome::Unreachable(_) => Category::Failed,
        }
    }
}

/// Outcome counts for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub success: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl Tally {
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome.category() {
            Category::Success => self.success += 1,
            Category::Skipped => self.skipped += 1,
            Category::Failed => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.success + self.skipped + self.failed
    }
}

/// Parse a listing body into invitations
pub fn parse_invitations(body: &str) -> Result<Vec<Invitation>, AppError> {
    Ok(serde_json::from_str(body)?)
}

/// List pending invitations.
///
/// Anything but 200 is fatal. A 4xx also drops the stored token, since it
/// almost always means the token is wrong or revoked.
pub async fn fetch_invitations<A: InvitationApi>(
    api: &A,
    credentials: &CredentialStore,
) -> Result<Vec<Invitation>> {
    let listing = api.list_invitations().await?;

    if listing.status != StatusCode::OK {
        let err = AppError::Listing {
            status: listing.status,
        };
        if err.is_client_error() {
            warn!(status = %listing.status, "listing rejected, discarding stored token");
            if let Err(e) = credentials.forget() {
                warn!(error = %format!("{:#}", e), "failed to remove stored token");
            }
        }
        return Err(err.into());
    }

    let invitations = parse_invitations(&listing.body)?;
    if is_full_page(&invitations) {
        warn!(
            count = invitations.len(),
            "received a full page of invitations, more may be pending; run again once this run finishes"
        );
    }
    Ok(invitations)
}

/// Only one page is read, so a full one means later invitations may be waiting
pub fn is_full_page(invitations: &[Invitation]) -> bool {
    invitations.len() >= PAGE_SIZE as usize
}

/// Accept every invitation owned by `org`, one attempt each.
///
/// `report` is called once per invitation, in order, as soon as its outcome
/// is known.
pub async fn process<A, F>(
    api: &A,
    invitations: &[Invitation],
    org: &str,
    dry_run: bool,
    mut report: F,
) -> Tally
where
    A: InvitationApi,
    F: FnMut(&Invitation, &Outcome),
{
    let mut tally = Tally::default();

    for invitation in invitations {
        let outcome = if invitation.owner() != org {
            Outcome::OtherOwner
        } else if dry_run {
            Outcome::WouldAccept
        } else {
            match api.accept_invitation(invitation.id).await {
                Ok(status) => Outcome::from_status(status),
                Err(e) => {
                    warn!(id = invitation.id, error = %e, "accept request failed");
                    Outcome::Unreachable(format!("{:#}", e))
                }
            }
        };

        debug!(id = invitation.id, repo = invitation.repo_name(), ?outcome, "processed");
        tally.record(&outcome);
        report(invitation, &outcome);
    }

    tally
}
