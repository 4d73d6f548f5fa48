//! Test app builder over [`build_app`] with injectable upstream clients.
//!
//! # Usage
//!
//! ```ignore
//! let mock = Arc::new(MockTheOneApiClient::new());
//! let app = TestAppBuilder::with_client(mock.clone())
//!     .with_cors(&["http://localhost:3000"])
//!     .build();
//!
//! // Use app.oneshot(...) to send requests
//! ```
//!
//! # Preset Builders
//!
//! - [`TestAppBuilder::unconfigured()`] - No API key, quote route answers 500
//! - [`TestAppBuilder::with_client()`] - Any `TheOneApiClient` implementation
//! - [`TestAppBuilder::with_mock()`] - Fresh `MockTheOneApiClient`

use std::sync::Arc;

use axum::Router;
use middle_earth_quotes::{
    app::build_app,
    config::{CorsConfig, SwaggerConfig},
    quotes::{QuoteResolver, QuotesState},
    the_one_api::{mock::MockTheOneApiClient, TheOneApiClient},
};

/// Builder for test applications that mirrors main.rs wiring.
pub struct TestAppBuilder {
    state: QuotesState,
    cors: CorsConfig,
    swagger: SwaggerConfig,
}

impl TestAppBuilder {
    /// App whose upstream client failed to construct.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self {
            state: QuotesState::unconfigured(),
            cors: CorsConfig::default(),
            swagger: SwaggerConfig::default(),
        }
    }

    /// App resolving quotes through `client`.
    #[must_use]
    pub fn with_client(client: Arc<dyn TheOneApiClient>) -> Self {
        Self {
            state: QuotesState::new(QuoteResolver::new(client)),
            ..Self::unconfigured()
        }
    }

    /// App backed by a fresh mock; returns the mock for configuration.
    #[must_use]
    pub fn with_mock() -> (Self, Arc<MockTheOneApiClient>) {
        let mock = Arc::new(MockTheOneApiClient::new());
        (Self::with_client(mock.clone()), mock)
    }

    /// Use a prepared state (e.g. from `app::quotes_state`).
    #[must_use]
    pub fn with_state(state: QuotesState) -> Self {
        Self {
            state,
            ..Self::unconfigured()
        }
    }

    /// Configure CORS with specific allowed origins.
    #[must_use]
    pub fn with_cors(mut self, origins: &[&str]) -> Self {
        self.cors.allowed_origins = origins.iter().map(|s| (*s).to_string()).collect();
        self
    }

    #[must_use]
    pub fn without_swagger(mut self) -> Self {
        self.swagger.enabled = false;
        self
    }

    #[must_use]
    pub fn build(self) -> Router {
        build_app(self.state, &self.cors, &self.swagger)
    }
}
