//! HTTP mock server helpers for testing outbound HTTP calls.
//!
//! A thin wrapper around `wiremock` for declarative HTTP stubbing of
//! The One API.
//!
//! # Quick Start
//!
//! ```ignore
//! let server = MockHttpServer::start().await;
//!
//! server
//!     .expect_get("/character")
//!     .with_header("Authorization", "Bearer test-api-key")
//!     .respond_with_json(json!({"docs": []}))
//!     .mount()
//!     .await;
//!
//! let client = HttpTheOneApiClient::new(server.url(), "test-api-key")?;
//! ```
//!
//! # Patterns
//!
//! - **Success response**: `.respond_with_json(value)` or `.respond_with_body(string)`
//! - **Error response**: `.respond_with_status(429)`
//! - **Timeout simulation**: `.respond_with_delay(Duration::from_secs(30))`
//! - **Request verification**: `.expect_times(1)` then `server.verify().await`

use std::time::Duration;

use serde_json::Value;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A running stub server.
pub struct MockHttpServer {
    server: MockServer,
}

impl MockHttpServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL to hand to the client under test.
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Escape hatch for matchers this wrapper does not cover.
    pub fn inner(&self) -> &MockServer {
        &self.server
    }

    /// Start describing a stub for `GET <path>`.
    pub fn expect_get(&self, path: &str) -> StubBuilder<'_> {
        StubBuilder {
            server: &self.server,
            path: path.to_string(),
            headers: Vec::new(),
            query: Vec::new(),
            status: 200,
            json: None,
            body: None,
            delay: None,
            times: None,
        }
    }

    /// Panic if any `expect_times` expectation was not met.
    pub async fn verify(&self) {
        self.server.verify().await;
    }
}

/// Builder for a single stubbed route.
pub struct StubBuilder<'a> {
    server: &'a MockServer,
    path: String,
    headers: Vec<(String, String)>,
    query: Vec<(String, String)>,
    status: u16,
    json: Option<Value>,
    body: Option<String>,
    delay: Option<Duration>,
    times: Option<u64>,
}

impl StubBuilder<'_> {
    /// Only match requests carrying this header value.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Only match requests carrying this (decoded) query parameter.
    pub fn with_query_param(mut self, name: &str, value: &str) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    /// Respond 200 with a JSON body.
    pub fn respond_with_json(mut self, body: Value) -> Self {
        self.json = Some(body);
        self
    }

    /// Respond with a raw (possibly malformed) body.
    pub fn respond_with_body(mut self, body: &str) -> Self {
        self.body = Some(body.to_string());
        self
    }

    pub fn respond_with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// JSON body to pair with a non-200 `respond_with_status`.
    pub fn with_json_response(self, body: Value) -> Self {
        self.respond_with_json(body)
    }

    pub fn respond_with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn expect_times(mut self, times: u64) -> Self {
        self.times = Some(times);
        self
    }

    pub async fn mount(self) {
        let mut mock = Mock::given(method("GET")).and(path(self.path.as_str()));
        for (name, value) in &self.headers {
            mock = mock.and(header(name.as_str(), value.as_str()));
        }
        for (name, value) in &self.query {
            mock = mock.and(query_param(name.as_str(), value.as_str()));
        }

        let mut template = ResponseTemplate::new(self.status);
        if let Some(json) = self.json {
            template = template.set_body_json(json);
        }
        if let Some(body) = self.body {
            template = template.set_body_string(body);
        }
        if let Some(delay) = self.delay {
            template = template.set_delay(delay);
        }

        let mut mock = mock.respond_with(template);
        if let Some(times) = self.times {
            mock = mock.expect(times);
        }
        mock.mount(self.server).await;
    }
}
