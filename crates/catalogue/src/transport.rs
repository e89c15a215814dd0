use async_trait::async_trait;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{CatalogueError, CatalogueResult};
use crate::retry::RetryPolicy;

pub const API_KEY_HEADER: &str = "apiKey";

/// Raw outcome of one request: whatever status the service answered with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status_code: u16,
    pub reason: String,
    pub full_text: String,
}

impl ApiResponse {
    pub fn new(status_code: u16, full_text: impl Into<String>) -> Self {
        let reason = reqwest::StatusCode::from_u16(status_code)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("")
            .to_string();
        Self {
            status_code,
            reason,
            full_text: full_text.into(),
        }
    }

    pub fn ok(full_text: impl Into<String>) -> Self {
        Self::new(200, full_text)
    }

    pub fn not_found() -> Self {
        Self::new(404, "")
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Authenticated access to the catalogue service. Endpoints are relative to
/// the configured API base.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, endpoint: &str) -> CatalogueResult<ApiResponse>;

    async fn put(&self, endpoint: &str, body: String) -> CatalogueResult<ApiResponse>;
}

/// reqwest-backed transport.
pub struct HttpTransport {
    config: ClientConfig,
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl HttpTransport {
    /// Assumes `config` was validated by [`crate::CatalogueClient::new`].
    pub fn new(config: ClientConfig) -> Self {
        let retry = RetryPolicy::from(&config.retry);
        Self {
            config,
            client: reqwest::Client::new(),
            retry,
        }
    }

    async fn read_response(
        endpoint: &str,
        response: reqwest::Response,
    ) -> CatalogueResult<ApiResponse> {
        let status = response.status();
        let full_text = response
            .text()
            .await
            .map_err(|source| CatalogueError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;

        debug!(endpoint, status = status.as_u16(), "Response received");
        debug!(endpoint, body = %full_text, "Response text");

        Ok(ApiResponse {
            status_code: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("").to_string(),
            full_text,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, endpoint: &str) -> CatalogueResult<ApiResponse> {
        let url = self.config.api_url(endpoint);
        debug!(%url, method = "GET", "Attempting call to endpoint");

        let response = self
            .retry
            .send(endpoint, || {
                self.client
                    .get(&url)
                    .header(API_KEY_HEADER, &self.config.api_key)
                    .timeout(self.config.timeouts.get_timeout())
                    .send()
            })
            .await
            .map_err(|source| CatalogueError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;

        Self::read_response(endpoint, response).await
    }

    async fn put(&self, endpoint: &str, body: String) -> CatalogueResult<ApiResponse> {
        let url = self.config.api_url(endpoint);
        debug!(%url, method = "PUT", body = %body, "Attempting call to endpoint");

        let response = self
            .retry
            .send(endpoint, || {
                self.client
                    .put(&url)
                    .header(API_KEY_HEADER, &self.config.api_key)
                    .header(CONTENT_TYPE, "application/json")
                    .header(CONTENT_LENGTH, body.len())
                    .timeout(self.config.timeouts.put_timeout())
                    .body(body.clone())
                    .send()
            })
            .await
            .map_err(|source| CatalogueError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;

        Self::read_response(endpoint, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_reason() {
        let response = ApiResponse::new(404, "");
        assert_eq!(response.reason, "Not Found");
        assert!(!response.is_success());

        let response = ApiResponse::ok("{}");
        assert_eq!(response.reason, "OK");
        assert!(response.is_success());
    }
}
