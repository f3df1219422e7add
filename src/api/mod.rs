pub mod client;

pub use client::*;

use anyhow::Result;
use reqwest::StatusCode;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const INVITATIONS_PATH: &str = "user/repository_invitations";
pub const ACCEPT_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

// A single page is fetched; anything past the first 100 invitations is left for the next run.
pub const PAGE_SIZE: u32 = 100;

/// Raw response of the invitation listing
#[derive(Debug, Clone)]
pub struct Listing {
    pub status: StatusCode,
    pub body: String,
}

/// Operations on the authenticated user's repository invitations
#[allow(async_fn_in_trait)]
pub trait InvitationApi {
    /// Fetch one page of pending invitations
    async fn list_invitations(&self) -> Result<Listing>;

    /// Accept an invitation, returning the response status
    async fn accept_invitation(&self, id: u64) -> Result<StatusCode>;
}
