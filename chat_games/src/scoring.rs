//! Client for the external scoring service.
//!
//! Chance games report a signed score delta per finished round. The service
//! itself lives elsewhere; this module only knows how to call it.

use crate::records::{ChatId, UserId};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Path of the adjust endpoint on the scoring service.
pub const DEFAULT_ADJUST_PATH: &str = "/update_chlen_API";

/// Scoring service errors
#[derive(Debug, Error)]
pub enum ScoreError {
    /// Transport-level failure (connect, timeout, body)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("Scoring service returned status {0}")]
    Status(u16),
}

/// Result type for scoring operations
pub type ScoreResult<T> = Result<T, ScoreError>;

/// Something that can apply score deltas to users.
#[async_trait]
pub trait ScoreService: Send + Sync {
    async fn adjust(
        &self,
        chat_id: ChatId,
        user_id: UserId,
        username: Option<&str>,
        delta: i64,
    ) -> ScoreResult<()>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AdjustRequest<'a> {
    chat_id: ChatId,
    user_id: UserId,
    username: Option<&'a str>,
    length: i64,
    secret_key: &'a str,
}

/// Scoring service reached over HTTP with a shared secret.
pub struct HttpScoreService {
    endpoint: String,
    secret: String,
    client: reqwest::Client,
}

impl HttpScoreService {
    /// Create a client for the service at `base_url`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Service root, e.g. `http://scores.internal:5000`
    /// * `secret` - Shared secret sent with every request
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: &str, secret: String, timeout: Duration) -> ScoreResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), DEFAULT_ADJUST_PATH),
            secret,
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ScoreService for HttpScoreService {
    async fn adjust(
        &self,
        chat_id: ChatId,
        user_id: UserId,
        username: Option<&str>,
        delta: i64,
    ) -> ScoreResult<()> {
        let request = AdjustRequest {
            chat_id,
            user_id,
            username,
            length: delta,
            secret_key: &self.secret,
        };

        let response = self.client.post(&self.endpoint).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScoreError::Status(status.as_u16()));
        }

        log::debug!(
            "Score adjusted by {} for user {} in chat {}",
            delta,
            user_id,
            chat_id
        );
        Ok(())
    }
}

/// Stand-in used when no scoring service is configured. Only logs.
#[derive(Debug, Default)]
pub struct NoopScoreService;

#[async_trait]
impl ScoreService for NoopScoreService {
    async fn adjust(
        &self,
        chat_id: ChatId,
        user_id: UserId,
        _username: Option<&str>,
        delta: i64,
    ) -> ScoreResult<()> {
        log::info!(
            "Scoring disabled; dropping delta {} for user {} in chat {}",
            delta,
            user_id,
            chat_id
        );
        Ok(())
    }
}
