use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use swimbuddz_config::BackendSettings;
use swimbuddz_readiness::MemberSnapshot;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum MemberFetchError {
    #[error("Members API rejected the credentials")]
    Unauthorized,
    #[error("Member not found")]
    NotFound,
    #[error("Members API returned status {0}")]
    Upstream(u16),
    #[error("Members API unreachable: {0}")]
    Transport(String),
    #[error("Malformed member payload: {0}")]
    Decode(String),
}

/// Read-only source of the authenticated member's record.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn fetch_me(&self, bearer_token: &str) -> Result<MemberSnapshot, MemberFetchError>;

    /// Key for member-scoped local state, taken from the member record.
    async fn member_key(&self, bearer_token: &str) -> Result<String, MemberFetchError> {
        let snapshot = self.fetch_me(bearer_token).await?;
        member_key_of(&snapshot)
    }
}

/// The record's id, or its email when the id is missing.
pub fn member_key_of(snapshot: &MemberSnapshot) -> Result<String, MemberFetchError> {
    snapshot
        .member_key()
        .map(str::to_string)
        .ok_or_else(|| MemberFetchError::Decode("member record has neither id nor email".into()))
}

/// Fetches `/members/me` from the members API, forwarding the caller's token.
pub struct HttpMemberRepository {
    client: reqwest::Client,
    member_url: String,
}

impl HttpMemberRepository {
    pub fn new(settings: &BackendSettings) -> Result<Self, MemberFetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| MemberFetchError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            member_url: format!(
                "{}{}",
                settings.base_url.trim_end_matches('/'),
                settings.member_path
            ),
        })
    }
}

#[async_trait]
impl MemberRepository for HttpMemberRepository {
    async fn fetch_me(&self, bearer_token: &str) -> Result<MemberSnapshot, MemberFetchError> {
        let resp = self
            .client
            .get(&self.member_url)
            .bearer_auth(bearer_token)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %self.member_url, error = %e, "Member fetch failed");
                MemberFetchError::Transport(e.to_string())
            })?;

        let status = resp.status();
        if !status.is_success() {
            debug!(url = %self.member_url, %status, "Members API returned an error");
            return Err(status_error(status));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| MemberFetchError::Transport(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| MemberFetchError::Decode(e.to_string()))
    }
}

fn status_error(status: StatusCode) -> MemberFetchError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => MemberFetchError::Unauthorized,
        StatusCode::NOT_FOUND => MemberFetchError::NotFound,
        other => MemberFetchError::Upstream(other.as_u16()),
    }
}
