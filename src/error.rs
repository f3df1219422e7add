use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Token not defined")]
    MissingToken,

    #[error("With great power comes great responsibility. Only one organization's invitations can be accepted.")]
    MissingOrganization,

    /// The invitation listing returned something other than 200.
    #[error("Unexpected HTTP results when getting data from user/repository_invitations: {status}")]
    Listing { status: StatusCode },

    #[error("Failed to parse invitation list: {0}")]
    MalformedListing(#[from] serde_json::Error),
}

impl AppError {
    /// Whether the server rejected the request itself, which usually means a bad token
    pub fn is_client_error(&self) -> bool {
        matches!(self, AppError::Listing { status } if status.is_client_error())
    }
}
