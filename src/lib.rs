//! invite-accept - accept pending GitHub repository invitations from one organization
//!
//! The library exposes the pieces the binary is built from, so the processing
//! step can be driven by any [`api::InvitationApi`] implementation.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod invitations;
pub mod prompt;
pub mod state;
pub mod stores;
pub mod types;

pub use api::client::GithubClient;
pub use config::Config;
pub use error::AppError;
