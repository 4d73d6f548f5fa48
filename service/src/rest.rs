//! Shared REST types, the health check, and `OpenAPI` documentation.

// The OpenApi derive macro generates code that triggers this lint
#![allow(clippy::needless_for_each)]

use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::quotes::ResolvedQuote;

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"detail": "Character 'UnknownCharacter' not found or has no quotes"}))]
pub struct ErrorBody {
    /// Human-readable explanation
    pub detail: String,
}

/// Generic message for failures that must not leak internals.
pub const INTERNAL_ERROR_DETAIL: &str = "An unexpected error occurred while processing your request";

/// Liveness information.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

/// `OpenAPI` documentation for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lord of the Rings Quote API",
        version = "1.0.0",
        description = "Random quotes from Lord of the Rings characters, backed by The One API (https://the-one-api.dev/). \
            Character names are matched case-insensitively and exact matches are preferred over partial ones. \
            Upstream rate limiting surfaces as 503 Service Unavailable.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(crate::quotes::http::get_character_quote, health_check),
    components(schemas(ResolvedQuote, ErrorBody, HealthStatus)),
    tags(
        (name = "quotes", description = "Operations related to character quotes from Lord of the Rings"),
        (name = "health", description = "Service health and status checks")
    )
)]
pub struct ApiDoc;

/// Health check
///
/// Always answers 200 while the process is serving; does not call upstream.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is running", body = HealthStatus)
    )
)]
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}
