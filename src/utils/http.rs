//! HTTP utilities for talking to the search API

use crate::error::{SearchError, SearchResult};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

const USER_AGENT: &str = concat!("serper-search-rust/", env!("CARGO_PKG_VERSION"));

/// Status and body of a completed HTTP exchange
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client wrapper with a fixed per-request timeout
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client with the given timeout
    pub fn with_timeout(timeout_ms: u64) -> SearchResult<Self> {
        let timeout = Duration::from_millis(timeout_ms);
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| SearchError::ConfigError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, timeout })
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }

    /// POST a JSON body with extra headers and return the status and raw body.
    ///
    /// Non-2xx statuses are returned as-is; callers decide what they mean.
    pub async fn post_json_with_headers<B>(
        &self,
        url: &str,
        body: &B,
        headers: &[(&str, &str)],
    ) -> SearchResult<HttpResponse>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self
            .client
            .post(url)
            .header("content-type", "application/json")
            .json(body);

        for (key, value) in headers {
            request = request.header(*key, *value);
        }

        let response = request.send().await.map_err(|e| self.transport_error(e, "send request"))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e, "read response"))?;

        Ok(HttpResponse { status, body })
    }

    fn transport_error(&self, error: reqwest::Error, action: &str) -> SearchError {
        if error.is_timeout() {
            SearchError::Timeout {
                timeout_ms: self.timeout_ms(),
            }
        } else {
            SearchError::HttpError {
                message: format!("Failed to {action}: {error}"),
                status_code: error.status().map(|s| s.as_u16()),
                response_body: None,
            }
        }
    }
}
