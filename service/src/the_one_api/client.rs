//! The One API client for fetching characters and quotes.
//!
//! The trait abstraction keeps the resolver testable:
//!
//! - `MockTheOneApiClient` for unit tests
//! - `MockHttpServer` (wiremock) for HTTP-level integration tests
//!
//! # Example
//!
//! ```ignore
//! use middle_earth_quotes::the_one_api::{HttpTheOneApiClient, TheOneApiClient};
//!
//! let client = HttpTheOneApiClient::new("https://the-one-api.dev/v2", "my-api-key")?;
//! if let Some(character) = client.search_character("gandalf").await? {
//!     let quotes = client.list_quotes(&character.id).await?;
//!     println!("{} has {} quotes", character.name, quotes.len());
//! }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    header::{HeaderValue, ACCEPT, AUTHORIZATION},
    StatusCode,
};
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::types::{Character, Page, Quote};
use crate::config::TheOneApiConfig;

/// Public endpoint of The One API.
pub const DEFAULT_BASE_URL: &str = "https://the-one-api.dev/v2";

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// Upstream error bodies are kept for logs only; cap them.
const MAX_DETAIL_LEN: usize = 512;

/// Coarse classification of an upstream failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    AuthFailed,
    NotFound,
    RateLimited,
    Unavailable,
    UpstreamOther,
}

/// Errors that can occur when calling The One API.
///
/// Every variant carries (or implies) the HTTP status the boundary layer
/// uses to pick its own response. No call is ever retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TheOneApiError {
    /// Upstream rejected the bearer token (401)
    #[error("authentication failed")]
    AuthFailed,

    /// Upstream resource does not exist (404)
    #[error("resource not found")]
    NotFound,

    /// Upstream rate limit hit (429)
    #[error("rate limit exceeded")]
    RateLimited,

    /// DNS, connect, timeout or body read failure
    #[error("failed to connect to The One API")]
    Unavailable { detail: String },

    /// Any other non-success status, or an undecodable success body
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        detail: Option<String>,
    },
}

impl TheOneApiError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::AuthFailed => ErrorKind::AuthFailed,
            Self::NotFound => ErrorKind::NotFound,
            Self::RateLimited => ErrorKind::RateLimited,
            Self::Unavailable { .. } => ErrorKind::Unavailable,
            Self::Api { .. } => ErrorKind::UpstreamOther,
        }
    }

    /// HTTP status associated with this failure.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::AuthFailed => 401,
            Self::NotFound => 404,
            Self::RateLimited => 429,
            Self::Unavailable { .. } => 503,
            Self::Api { status, .. } => *status,
        }
    }

    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Unavailable { detail } => Some(detail),
            Self::Api { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Map a non-success upstream status to an error.
    #[must_use]
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => Self::AuthFailed,
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited,
            other => Self::Api {
                status: other.as_u16(),
                message: format!("API request failed: {}", other.as_u16()),
                detail: (!body.is_empty()).then(|| body.chars().take(MAX_DETAIL_LEN).collect()),
            },
        }
    }

    fn transport(err: &reqwest::Error) -> Self {
        Self::Unavailable {
            detail: err.to_string(),
        }
    }
}

/// Errors raised while constructing a client, before any request is made.
#[derive(Debug, Error)]
pub enum ClientConfigError {
    #[error("THE_ONE_API_KEY is required but not set")]
    MissingApiKey,

    #[error("API key contains characters that are not valid in an HTTP header")]
    InvalidApiKey,

    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Trait for The One API operations.
#[async_trait]
pub trait TheOneApiClient: Send + Sync {
    /// Look up a character by name, case-insensitively.
    ///
    /// An exact name match wins over a substring match; within each pass the
    /// first candidate in upstream order is taken.
    async fn search_character(&self, name: &str) -> Result<Option<Character>, TheOneApiError>;

    /// List the dialog-bearing quotes of a character, in upstream order.
    async fn list_quotes(&self, character_id: &str) -> Result<Vec<Quote>, TheOneApiError>;
}

/// Pick the best candidate for `name` from a search result.
///
/// Exact (case-insensitive) match first, then the first candidate whose
/// name contains `name`. Candidates are never re-ordered.
#[must_use]
pub fn select_character(candidates: Vec<Character>, name: &str) -> Option<Character> {
    let needle = name.to_lowercase();
    let mut partial = None;

    for candidate in candidates {
        let candidate_name = candidate.name.to_lowercase();
        if candidate_name == needle {
            return Some(candidate);
        }
        if partial.is_none() && candidate_name.contains(&needle) {
            partial = Some(candidate);
        }
    }

    partial
}

/// Build the upstream `name` filter: a case-insensitive regex matching the
/// name literally.
#[must_use]
pub fn name_filter(name: &str) -> String {
    format!("/{}/i", regex::escape(name))
}

/// HTTP-based implementation of `TheOneApiClient`.
pub struct HttpTheOneApiClient {
    client: reqwest::Client,
    base_url: String,
    auth: HeaderValue,
}

impl HttpTheOneApiClient {
    /// Create a client with the default timeout.
    ///
    /// # Errors
    /// Returns `ClientConfigError` if the key is blank or the HTTP client
    /// cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl AsRef<str>,
    ) -> Result<Self, ClientConfigError> {
        let client = reqwest::Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Self::with_client(client, base_url, api_key)
    }

    /// Create a client from the `the_one_api` configuration section.
    ///
    /// # Errors
    /// Returns `ClientConfigError::MissingApiKey` when no key is configured.
    pub fn from_config(config: &TheOneApiConfig) -> Result<Self, ClientConfigError> {
        let api_key = config
            .api_key
            .as_deref()
            .ok_or(ClientConfigError::MissingApiKey)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Self::with_client(client, config.base_url.clone(), api_key)
    }

    /// Create a client with a custom `reqwest::Client` (for testing with custom config).
    ///
    /// # Errors
    /// Returns `ClientConfigError` if the key is blank or not header-safe.
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl AsRef<str>,
    ) -> Result<Self, ClientConfigError> {
        let api_key = api_key.as_ref().trim();
        if api_key.is_empty() {
            return Err(ClientConfigError::MissingApiKey);
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| ClientConfigError::InvalidApiKey)?;
        auth.set_sensitive(true);

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth,
        })
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        what: &str,
    ) -> Result<Page<T>, TheOneApiError> {
        tracing::debug!(url, "calling The One API");

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, self.auth.clone())
            .header(ACCEPT, "application/json")
            .query(query)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(url, error = %e, "The One API request did not complete");
                TheOneApiError::transport(&e)
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(url, status = status.as_u16(), "The One API returned an error");
            return Err(TheOneApiError::from_status(status, &body));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TheOneApiError::transport(&e))?;

        serde_json::from_slice(&bytes).map_err(|e| TheOneApiError::Api {
            status: 500,
            message: format!("failed to decode {what} response"),
            detail: Some(e.to_string()),
        })
    }
}

#[async_trait]
impl TheOneApiClient for HttpTheOneApiClient {
    async fn search_character(&self, name: &str) -> Result<Option<Character>, TheOneApiError> {
        let url = format!("{}/character", self.base_url);
        let filter = name_filter(name);

        let page: Page<Character> = self
            .get_page(&url, &[("name", filter.as_str())], "character")
            .await?;

        tracing::debug!(name, candidates = page.docs.len(), "character search finished");
        Ok(select_character(page.docs, name))
    }

    async fn list_quotes(&self, character_id: &str) -> Result<Vec<Quote>, TheOneApiError> {
        let url = format!(
            "{}/character/{}/quote",
            self.base_url,
            urlencoding::encode(character_id)
        );

        let page: Page<Quote> = self.get_page(&url, &[], "quote").await?;

        Ok(page.docs.into_iter().filter(Quote::has_dialog).collect())
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::missing_const_for_fn,
    clippy::must_use_candidate
)]
pub mod mock {
    //! Mock implementation for unit testing.

    use super::{Character, Quote, TheOneApiClient, TheOneApiError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Mock implementation of `TheOneApiClient` for unit tests.
    ///
    /// Configured results are returned on every call (not consumed), so one
    /// mock can serve repeated requests. Verify calls with
    /// `search_character_calls()` and `list_quotes_calls()`.
    pub struct MockTheOneApiClient {
        search_character_result: Mutex<Result<Option<Character>, TheOneApiError>>,
        list_quotes_result: Mutex<Result<Vec<Quote>, TheOneApiError>>,
        search_character_calls: Mutex<Vec<String>>,
        list_quotes_calls: Mutex<Vec<String>>,
    }

    impl MockTheOneApiClient {
        /// A mock that finds no characters and no quotes.
        pub fn new() -> Self {
            Self {
                search_character_result: Mutex::new(Ok(None)),
                list_quotes_result: Mutex::new(Ok(Vec::new())),
                search_character_calls: Mutex::new(Vec::new()),
                list_quotes_calls: Mutex::new(Vec::new()),
            }
        }

        /// Set the result for `search_character` calls.
        pub fn set_search_character_result(
            &self,
            result: Result<Option<Character>, TheOneApiError>,
        ) {
            *self.search_character_result.lock().unwrap() = result;
        }

        /// Set the result for `list_quotes` calls.
        pub fn set_list_quotes_result(&self, result: Result<Vec<Quote>, TheOneApiError>) {
            *self.list_quotes_result.lock().unwrap() = result;
        }

        /// Get all names passed to `search_character`.
        pub fn search_character_calls(&self) -> Vec<String> {
            self.search_character_calls.lock().unwrap().clone()
        }

        /// Get all character IDs passed to `list_quotes`.
        pub fn list_quotes_calls(&self) -> Vec<String> {
            self.list_quotes_calls.lock().unwrap().clone()
        }
    }

    impl Default for MockTheOneApiClient {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl TheOneApiClient for MockTheOneApiClient {
        async fn search_character(
            &self,
            name: &str,
        ) -> Result<Option<Character>, TheOneApiError> {
            self.search_character_calls
                .lock()
                .unwrap()
                .push(name.to_string());

            self.search_character_result.lock().unwrap().clone()
        }

        async fn list_quotes(&self, character_id: &str) -> Result<Vec<Quote>, TheOneApiError> {
            self.list_quotes_calls
                .lock()
                .unwrap()
                .push(character_id.to_string());

            self.list_quotes_result.lock().unwrap().clone()
        }
    }
}
