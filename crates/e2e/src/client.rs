//! HTTP client shared by the API checks

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{E2eError, E2eResult};

/// Status and textual body of a completed exchange.
///
/// The body is always read as text so it can be logged even when
/// the check later fails to parse it.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Fail with `RequestFailure` unless the status is 2xx
    pub fn require_success(self) -> E2eResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(E2eError::RequestFailure {
                status: Some(self.status),
                body: self.body,
            })
        }
    }

    /// Fail with `UnexpectedStatus` unless the status is exactly `expected`
    pub fn require_status(self, expected: u16) -> E2eResult<Self> {
        if self.status == expected {
            Ok(self)
        } else {
            Err(E2eError::UnexpectedStatus {
                expected,
                actual: self.status,
                body: self.body,
            })
        }
    }

    /// Deserialize the body
    pub fn json<T: DeserializeOwned>(&self) -> E2eResult<T> {
        serde_json::from_str(&self.body)
            .map_err(|e| E2eError::Parse(format!("{e} in body: {}", self.body)))
    }
}

/// reqwest wrapper bound to one base address with an explicit timeout.
///
/// The connection pool lives as long as the client.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client with the given base URL and timeout
    pub fn new(base_url: &str, timeout: Duration) -> E2eResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create from an existing `reqwest::Client`
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a full URL from a path like `/api/users`
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub async fn get(&self, path: &str) -> E2eResult<ApiResponse> {
        self.send(self.client.get(self.url(path)), None).await
    }

    pub async fn post_json<T: Serialize>(
        &self,
        path: &str,
        body: &T,
        token: Option<&str>,
    ) -> E2eResult<ApiResponse> {
        self.send(self.client.post(self.url(path)).json(body), token)
            .await
    }

    pub async fn put_json<T: Serialize>(
        &self,
        path: &str,
        body: &T,
        token: Option<&str>,
    ) -> E2eResult<ApiResponse> {
        self.send(self.client.put(self.url(path)).json(body), token)
            .await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> E2eResult<ApiResponse> {
        self.send(self.client.delete(self.url(path)), token).await
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        token: Option<&str>,
    ) -> E2eResult<ApiResponse> {
        let request = match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let resp = request.send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        debug!("<- {} ({} bytes)", status, body.len());

        Ok(ApiResponse { status, body })
    }
}
