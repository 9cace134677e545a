//! HTTP client for the remote shortening service
//!
//! Three calls against `<base>/api/links`. Every failure is reduced to an
//! [`ApiError`] whose `Display` is what the user sees.

use crate::constants::{APP_VERSION, LINKS_PATH};
use crate::types::*;
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Network failure, refused connection or timeout
    #[error("Could not reach the server: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Body did not have the expected shape
    #[error("Invalid response from server")]
    InvalidResponse,

    #[error("Invalid API base URL '{url}': {reason}")]
    BaseUrl { url: String, reason: String },
}

#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| ApiError::BaseUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;

        let client = reqwest::Client::builder()
            .user_agent(format!("tinylink/{}", APP_VERSION))
            .timeout(timeout)
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn links_url(&self) -> String {
        format!("{}{}", self.base_url, LINKS_PATH)
    }

    /// `<base>/api/links/<id>` with the id encoded as a single path segment
    fn link_url(&self, id: &str) -> Result<Url, ApiError> {
        let raw = self.links_url();
        let mut url = Url::parse(&raw).map_err(|e| ApiError::BaseUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;
        url.path_segments_mut()
            .map_err(|_| ApiError::BaseUrl {
                url: raw.clone(),
                reason: "cannot be a base".into(),
            })?
            .push(id);
        Ok(url)
    }

    /// `GET /api/links`
    pub async fn list_links(&self) -> Result<Vec<LinkRecord>, ApiError> {
        let url = self.links_url();
        debug!(url = %url, "Fetching links");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(status_error(status, &body, "Failed to load links"));
        }

        let parsed: LinksResponse = serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "Malformed link list");
            ApiError::InvalidResponse
        })?;
        debug!(count = parsed.data.len(), "Links fetched");
        Ok(parsed.data)
    }

    /// `POST /api/links`, returns the generated short URL
    pub async fn create_link(&self, long_url: &str) -> Result<String, ApiError> {
        let url = self.links_url();
        debug!(url = %url, long_url = %long_url, "Creating short link");

        let response = self
            .client
            .post(&url)
            .json(&CreateLinkRequest { long_url })
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(status_error(status, &body, "Failed to shorten URL"));
        }

        let parsed: CreateLinkResponse = serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "Malformed create response");
            ApiError::InvalidResponse
        })?;
        match parsed.short_url {
            Some(short_url) if parsed.success && !short_url.is_empty() => Ok(short_url),
            _ => {
                warn!(success = parsed.success, message = ?parsed.message, "Create response without short URL");
                Err(ApiError::InvalidResponse)
            }
        }
    }

    /// `DELETE /api/links/<id>`; only the status is checked
    pub async fn delete_link(&self, id: &str) -> Result<(), ApiError> {
        let url = self.link_url(id)?;
        debug!(url = %url, "Deleting link");

        let response = self.client.delete(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body, "Failed to delete link"));
        }
        Ok(())
    }
}

/// Prefer the server's `message`, otherwise `"<fallback>: <code>"`
fn status_error(status: StatusCode, body: &str, fallback: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("{}: {}", fallback, status.as_u16()));
    warn!(status = status.as_u16(), message = %message, "Request rejected");
    ApiError::Status {
        status: status.as_u16(),
        message,
    }
}
