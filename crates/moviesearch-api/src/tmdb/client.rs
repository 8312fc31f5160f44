//! `TmdbClient` - TMDB API client implementation.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use super::api::MovieApi;
use super::error::ApiError;
use super::http::{HttpAdapter, RequestOptions};
use super::model::{DetailRecord, ResultPage};
use super::types::{TmdbErrorResponse, TmdbMovieDetails, TmdbMoviePage};

/// Default base URL for TMDB API v3.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Default response language.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Number of movies TMDB returns per list page.
pub const MOVIES_PER_PAGE: usize = 20;

/// How the credential is attached to requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialKind {
    /// v3 API key sent as the `api_key` query parameter.
    #[default]
    ApiKey,
    /// v4 read access token sent as `Authorization: Bearer`.
    Bearer,
}

/// How a non-2xx 404 is interpreted for an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookup {
    /// List endpoints: every failure status is an `Http` error.
    Listing,
    /// Single-record endpoints: 404 means the record does not exist.
    Record,
}

/// TMDB API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP adapter.
    http: HttpAdapter,
    /// Base URL for API requests.
    base_url: Url,
    /// API credential.
    api_key: String,
    /// How `api_key` is sent.
    credential_kind: CredentialKind,
    /// Response language.
    language: String,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    user_agent: Option<String>,
    language: Option<String>,
    credential_kind: CredentialKind,
    timeout: Option<Duration>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            user_agent: None,
            language: None,
            credential_kind: CredentialKind::ApiKey,
            timeout: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API credential (required).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the response language (default: "en-US").
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets how the credential is attached (default: `api_key` query parameter).
    #[must_use]
    pub const fn credential_kind(mut self, kind: CredentialKind) -> Self {
        self.credential_kind = kind;
        self
    }

    /// Sets a per-request timeout. Unset by default: requests wait indefinitely.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_key` is not set or blank.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .context("api_key is required")?;
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http: HttpAdapter::new(http_client, self.timeout),
            base_url,
            api_key,
            credential_kind: self.credential_kind,
            language: self
                .language
                .unwrap_or_else(|| String::from(DEFAULT_LANGUAGE)),
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Returns the configured response language.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Sends a GET request with the credential and language attached,
    /// then interprets the status and decodes the body.
    #[instrument(skip_all, fields(path = path))]
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        lookup: Lookup,
    ) -> Result<T, ApiError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| {
                ApiError::InvalidRequest(format!("failed to join URL path {path}: {e}"))
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            if self.credential_kind == CredentialKind::ApiKey {
                pairs.append_pair("api_key", &self.api_key);
            }
            pairs.append_pair("language", &self.language);
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        let mut options = RequestOptions::default().header("Accept", "application/json");
        if self.credential_kind == CredentialKind::Bearer {
            options = options.header("Authorization", format!("Bearer {}", self.api_key));
        }

        let response = self.http.fetch(url, &options).await?;

        if !response.is_success() {
            if lookup == Lookup::Record && response.status == 404 {
                tracing::debug!("TMDB record not found");
                return Err(ApiError::NotFound);
            }
            let message = serde_json::from_str::<TmdbErrorResponse>(&response.body)
                .ok()
                .map(|e| e.status_message);
            tracing::debug!(status = response.status, ?message, "TMDB API error");
            return Err(ApiError::Http {
                status: response.status,
                message,
            });
        }

        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Decode(format!("{path}: {e}")))
    }
}

/// Rejects page 0 before any request is made.
fn check_page(page: u32) -> Result<(), ApiError> {
    if page == 0 {
        return Err(ApiError::InvalidRequest(String::from(
            "page must be at least 1",
        )));
    }
    Ok(())
}

impl MovieApi for TmdbClient {
    #[instrument(skip_all, fields(page = page))]
    async fn fetch_popular(&self, page: u32) -> Result<ResultPage, ApiError> {
        check_page(page)?;
        let query = [("page", page.to_string())];
        let raw: TmdbMoviePage = self.get_json("movie/popular", &query, Lookup::Listing).await?;
        ResultPage::try_from(raw)
    }

    #[instrument(skip_all, fields(page = page))]
    async fn search_by_query(&self, query: &str, page: u32) -> Result<ResultPage, ApiError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ApiError::InvalidRequest(String::from(
                "search query must not be empty",
            )));
        }
        check_page(page)?;
        let params = [("query", String::from(query)), ("page", page.to_string())];
        let raw: TmdbMoviePage = self.get_json("search/movie", &params, Lookup::Listing).await?;
        ResultPage::try_from(raw)
    }

    #[instrument(skip_all, fields(id = id))]
    async fn fetch_detail(&self, id: u64) -> Result<DetailRecord, ApiError> {
        let path = format!("movie/{id}");
        let raw: TmdbMovieDetails = self.get_json(&path, &[], Lookup::Record).await?;
        Ok(DetailRecord::from(raw))
    }
}
