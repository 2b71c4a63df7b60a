//! HTTP client for the remote task store.

use super::error::SyncError;
use super::types::{RemoteSprint, RemoteTask, StatusUpdate, SyncAck};
use crate::config::ApiConfig;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// The three boundary calls the board makes against the backend
#[async_trait]
pub trait TaskRemote: Send + Sync {
    /// `GET tasks`
    async fn fetch_tasks(&self) -> Result<Vec<RemoteTask>, SyncError>;

    /// `GET tasks/fetch`
    async fn fetch_sprints(&self) -> Result<Vec<RemoteSprint>, SyncError>;

    /// `POST tasks/update`
    async fn update_status(&self, update: &StatusUpdate) -> Result<SyncAck, SyncError>;
}

/// Extract a human-readable message from a JSON error body.
///
/// Tries `message`, then `error`, then falls back to the raw body.
fn extract_error_message(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(msg) = json.get("message").and_then(|v| v.as_str()) {
            return msg.to_string();
        }
        if let Some(err) = json.get("error").and_then(|v| v.as_str()) {
            return err.to_string();
        }
    }
    body.to_string()
}

/// `TaskRemote` over HTTP/JSON
pub struct HttpTaskRemote {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpTaskRemote {
    /// Create a client for the configured backend
    pub fn new(config: &ApiConfig) -> Result<Self, SyncError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Map a non-success response to `SyncError::Api`.
    async fn check_response(
        &self,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, SyncError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(SyncError::Api {
            status: status.as_u16(),
            body: extract_error_message(&body),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SyncError> {
        let url = self.url(path);
        debug!(%url, "fetching");
        let response = self.authorize(self.client.get(&url)).send().await?;
        let response = self.check_response(response).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl TaskRemote for HttpTaskRemote {
    async fn fetch_tasks(&self) -> Result<Vec<RemoteTask>, SyncError> {
        self.get_json("tasks").await
    }

    async fn fetch_sprints(&self) -> Result<Vec<RemoteSprint>, SyncError> {
        self.get_json("tasks/fetch").await
    }

    async fn update_status(&self, update: &StatusUpdate) -> Result<SyncAck, SyncError> {
        let url = self.url("tasks/update");
        let response = self
            .authorize(self.client.post(&url))
            .json(update)
            .send()
            .await?;
        self.check_response(response).await?;
        Ok(SyncAck {
            task_id: update.id.clone(),
            status: update.status.clone(),
        })
    }
}
