//! Backend REST collaborators for subscription persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors from talking to the backend.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server responded {0}")]
    Status(u16),
}

/// Response to the VAPID key fetch.
#[derive(Debug, Clone, Deserialize)]
pub struct VapidKeyResponse {
    pub success: bool,
    #[serde(default)]
    pub vapid_public_key: Option<String>,
}

/// Generic success envelope for subscription mutations.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default)]
    pub detail: Option<String>,
}

/// Subscription record as mirrored to the backend: keys base64-encoded,
/// field names matching the wire contract.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionUpload {
    pub endpoint: String,
    pub keys: UploadKeys,
    #[serde(rename = "expirationTime")]
    pub expiration_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadKeys {
    pub p256dh: String,
    pub auth: String,
}

/// The three backend operations the lifecycle manager consumes.
#[async_trait]
pub trait PushApi: Send + Sync {
    /// `GET /notifications/vapid-key` — public, no auth.
    async fn fetch_vapid_key(&self) -> Result<VapidKeyResponse, ApiError>;

    /// `POST /notifications/push/subscribe` — persist the record under the
    /// caller's authenticated identity.
    async fn register_subscription(
        &self,
        token: &str,
        upload: &SubscriptionUpload,
    ) -> Result<ApiResponse, ApiError>;

    /// `DELETE /notifications/push/subscribe?endpoint=...` — best-effort;
    /// callers do not gate local state changes on the outcome.
    async fn delete_subscription(&self, token: &str, endpoint: &str) -> Result<(), ApiError>;
}

/// Production implementation over the application backend.
pub struct HttpPushApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpPushApi {
    pub fn new(server_url: &str) -> Self {
        Self {
            base_url: format!("{}/notifications", server_url.trim_end_matches('/')),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl PushApi for HttpPushApi {
    async fn fetch_vapid_key(&self) -> Result<VapidKeyResponse, ApiError> {
        let url = format!("{}/vapid-key", self.base_url);
        let resp = self.client.get(&url).send().await?;

        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status().as_u16()));
        }

        Ok(resp.json().await?)
    }

    async fn register_subscription(
        &self,
        token: &str,
        upload: &SubscriptionUpload,
    ) -> Result<ApiResponse, ApiError> {
        let url = format!("{}/push/subscribe", self.base_url);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(upload)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status().as_u16()));
        }

        Ok(resp.json().await?)
    }

    async fn delete_subscription(&self, token: &str, endpoint: &str) -> Result<(), ApiError> {
        let url = format!("{}/push/subscribe", self.base_url);
        let resp = self
            .client
            .delete(&url)
            .bearer_auth(token)
            .query(&[("endpoint", endpoint)])
            .send()
            .await?;

        debug!(status = resp.status().as_u16(), "Subscription delete response");

        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status().as_u16()));
        }

        Ok(())
    }
}
