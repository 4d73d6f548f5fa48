//! The One API client module.
//!
//! Fetches Lord of the Rings characters and movie quotes from
//! <https://the-one-api.dev>.
//!
//! # Architecture
//!
//! - [`TheOneApiClient`] - Trait defining the two upstream operations
//! - [`HttpTheOneApiClient`] - Real HTTP implementation using reqwest
//! - [`mock::MockTheOneApiClient`] - Mock for unit tests (behind `test-utils` feature)
//!
//! # Testing Patterns
//!
//! ## Unit Tests (Mock Implementation)
//!
//! ```ignore
//! use middle_earth_quotes::the_one_api::{mock::MockTheOneApiClient, Character};
//!
//! let mock = MockTheOneApiClient::new();
//! mock.set_search_character_result(Ok(Some(Character::new("5cd9", "Gandalf"))));
//! ```
//!
//! ## Integration Tests (HTTP Stubbing)
//!
//! ```ignore
//! let server = MockHttpServer::start().await;
//!
//! server
//!     .expect_get("/character")
//!     .with_header("Authorization", "Bearer test-key")
//!     .respond_with_json(json!({ "docs": [ ... ] }))
//!     .mount()
//!     .await;
//!
//! let client = HttpTheOneApiClient::new(server.url(), "test-key")?;
//! let gandalf = client.search_character("gandalf").await?;
//! ```

mod client;
mod types;

pub use client::{
    name_filter, select_character, ClientConfigError, ErrorKind, HttpTheOneApiClient,
    TheOneApiClient, TheOneApiError, DEFAULT_BASE_URL, DEFAULT_TIMEOUT,
};
pub use types::{Character, Page, Quote};

#[cfg(any(test, feature = "test-utils"))]
pub use client::mock;
