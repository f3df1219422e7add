use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use tracing::debug;

use super::{InvitationApi, Listing, ACCEPT_MEDIA_TYPE, INVITATIONS_PATH, PAGE_SIZE};
use crate::config::Config;

/// GitHub REST API client for repository invitations
pub struct GithubClient {
    base_url: String,
    token: String,
    http: Client,
}

impl GithubClient {
    /// Create a new client authenticated with `token`
    pub fn new(config: &Config, token: impl Into<String>) -> Result<Self> {
        Ok(Self {
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            http: Client::builder()
                .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
                .redirect(reqwest::redirect::Policy::none())
                .build()?,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn auth_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("token {}", self.token))
                .context("Token contains characters not allowed in a header")?,
        );
        Ok(headers)
    }
}

impl InvitationApi for GithubClient {
    async fn list_invitations(&self) -> Result<Listing> {
        let url = self.url(INVITATIONS_PATH);
        debug!(%url, "listing invitations");

        let res = self
            .http
            .get(&url)
            .headers(self.auth_headers()?)
            .query(&[("per_page", PAGE_SIZE)])
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?;

        let status = res.status();
        let body = res.text().await.context("Failed to read invitation list")?;
        debug!(%status, bytes = body.len(), "listing response");

        Ok(Listing { status, body })
    }

    async fn accept_invitation(&self, id: u64) -> Result<StatusCode> {
        let url = self.url(&format!("{}/{}", INVITATIONS_PATH, id));

        let mut headers = self.auth_headers()?;
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_MEDIA_TYPE));

        let res = self
            .http
            .patch(&url)
            .headers(headers)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?;

        debug!(id, status = %res.status(), "accept response");
        Ok(res.status())
    }
}
