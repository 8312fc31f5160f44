//! `HttpAdapter` - thin wrapper around `reqwest::Client`.
//!
//! Performs the call and hands back status + body. Status codes are not
//! interpreted here; that is the client's job.

use std::time::Duration;

use reqwest::{Client, Method};
use tracing::instrument;
use url::Url;

use super::error::ApiError;

/// Per-request options: method and extra headers.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// HTTP method (default: GET).
    pub method: Method,
    /// Extra headers, applied after the adapter's defaults.
    pub headers: Vec<(String, String)>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: Vec::new(),
        }
    }
}

impl RequestOptions {
    /// Adds a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Raw response: status code and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: String,
}

impl RawResponse {
    /// Returns `true` for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// HTTP client adapter.
#[derive(Debug, Clone)]
pub struct HttpAdapter {
    /// Underlying HTTP client.
    http_client: Client,
    /// Per-request timeout; `None` waits indefinitely.
    timeout: Option<Duration>,
}

impl HttpAdapter {
    /// Creates an adapter around an existing client.
    #[must_use]
    pub const fn new(http_client: Client, timeout: Option<Duration>) -> Self {
        Self {
            http_client,
            timeout,
        }
    }

    /// Performs the request.
    ///
    /// `Content-Type: application/json` is attached to every request.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Network` if the request cannot be completed
    /// (connection failure, timeout, body read failure).
    #[instrument(skip_all)]
    pub async fn fetch(&self, url: Url, options: &RequestOptions) -> Result<RawResponse, ApiError> {
        let mut builder = self
            .http_client
            .request(options.method.clone(), url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        for (name, value) in &options.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let request = builder
            .build()
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        tracing::debug!(method = %request.method(), url = %redact(request.url()), "HTTP request");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| network_error(&e))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| network_error(&e))?;

        tracing::debug!(status, bytes = body.len(), "HTTP response");
        Ok(RawResponse { status, body })
    }
}

/// Maps a transport error to `ApiError::Network`.
fn network_error(err: &reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Network(format!("request timed out: {err}"))
    } else {
        ApiError::Network(err.to_string())
    }
}

/// Returns the URL with the `api_key` query value masked, for logging.
fn redact(url: &Url) -> Url {
    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            if k == "api_key" {
                (k.into_owned(), String::from("***"))
            } else {
                (k.into_owned(), v.into_owned())
            }
        })
        .collect();
    if pairs.is_empty() {
        return masked;
    }
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked
}
