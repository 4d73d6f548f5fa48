//! HTTP handler for `GET /quotes/{character_name}`.

use axum::{
    extract::{rejection::PathRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use super::resolver::{QuoteResolver, Resolution, ResolvedQuote};
use crate::rest::ErrorBody;
use crate::the_one_api::{ErrorKind, TheOneApiError};

/// Longest accepted character name, after trimming.
pub const MAX_NAME_LEN: usize = 100;

/// Shared state for the quote route.
///
/// `resolver` is `None` when the upstream client could not be built (no API
/// key); the route then answers 500 instead of the process refusing to start.
#[derive(Clone)]
pub struct QuotesState {
    resolver: Option<QuoteResolver>,
}

impl QuotesState {
    #[must_use]
    pub const fn new(resolver: QuoteResolver) -> Self {
        Self {
            resolver: Some(resolver),
        }
    }

    /// State for a service whose upstream client is not configured.
    #[must_use]
    pub const fn unconfigured() -> Self {
        Self { resolver: None }
    }

    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.resolver.is_some()
    }
}

/// Client-facing failures of the quote route.
///
/// This is the only place upstream failures turn into status codes.
#[derive(Debug)]
pub enum QuoteApiError {
    EmptyName,
    NameTooLong,
    /// The path segment could not be decoded as a name.
    InvalidName,
    /// No character matched, or it has no usable quotes.
    NoQuote(String),
    NotConfigured,
    Upstream {
        name: String,
        source: TheOneApiError,
    },
}

impl QuoteApiError {
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::EmptyName | Self::NameTooLong | Self::InvalidName => StatusCode::BAD_REQUEST,
            Self::NoQuote(_) => StatusCode::NOT_FOUND,
            Self::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream { source, .. } => match source.kind() {
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::AuthFailed | ErrorKind::RateLimited | ErrorKind::Unavailable => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                // Only upstream error statuses are passed through
                ErrorKind::UpstreamOther => StatusCode::from_u16(source.status())
                    .ok()
                    .filter(|status| status.is_client_error() || status.is_server_error())
                    .unwrap_or(StatusCode::BAD_GATEWAY),
            },
        }
    }
}

impl std::fmt::Display for QuoteApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => f.write_str("Character name cannot be empty"),
            Self::NameTooLong => write!(
                f,
                "Character name cannot be longer than {MAX_NAME_LEN} characters"
            ),
            Self::InvalidName => f.write_str("Character name must be valid UTF-8 text"),
            Self::NoQuote(name) => write!(f, "Character '{name}' not found or has no quotes"),
            Self::NotConfigured => f.write_str(
                "The One API service is not properly configured. Please check THE_ONE_API_KEY environment variable.",
            ),
            Self::Upstream { name, source } => match source.kind() {
                ErrorKind::NotFound => write!(f, "Character '{name}' not found"),
                ErrorKind::AuthFailed => f.write_str("The One API authentication failed"),
                ErrorKind::RateLimited => {
                    f.write_str("The One API rate limit exceeded. Please try again later.")
                }
                ErrorKind::Unavailable => f.write_str(
                    "The One API is currently unavailable. Please try again later.",
                ),
                ErrorKind::UpstreamOther => write!(f, "The One API error: {source}"),
            },
        }
    }
}

impl IntoResponse for QuoteApiError {
    fn into_response(self) -> axum::response::Response {
        (
            self.status_code(),
            Json(ErrorBody {
                detail: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Router for the quote endpoint. Expects `Extension<QuotesState>`.
pub fn router() -> Router {
    Router::new().route("/quotes/{character_name}", get(get_character_quote))
}

/// Get a random character quote
///
/// Looks the character up by name (case-insensitive; an exact name wins over a
/// partial match) and returns one of their movie lines at random.
///
/// # Errors
///
/// Returns `QuoteApiError` for invalid names, unknown characters, and
/// upstream failures.
#[utoipa::path(
    get,
    path = "/quotes/{character_name}",
    tag = "quotes",
    operation_id = "get_character_quote",
    params(
        ("character_name" = String, Path, description = "Character name (case-insensitive)", example = "Gandalf")
    ),
    responses(
        (status = 200, description = "Successfully retrieved a random quote", body = ResolvedQuote),
        (status = 400, description = "Empty, overlong or undecodable character name", body = ErrorBody),
        (status = 404, description = "Character not found or has no quotes", body = ErrorBody),
        (status = 500, description = "Service not configured or internal error", body = ErrorBody),
        (status = 503, description = "The One API unavailable, rate limited or rejecting our key", body = ErrorBody)
    )
)]
pub async fn get_character_quote(
    Extension(state): Extension<QuotesState>,
    character_name: Result<Path<String>, PathRejection>,
) -> Result<Json<ResolvedQuote>, QuoteApiError> {
    let Path(character_name) = character_name.map_err(|rejection| {
        tracing::warn!(error = %rejection, "character name could not be decoded");
        QuoteApiError::InvalidName
    })?;
    let name = character_name.trim();
    if name.is_empty() {
        tracing::warn!("empty character name provided");
        return Err(QuoteApiError::EmptyName);
    }
    if name.chars().count() > MAX_NAME_LEN {
        tracing::warn!(length = name.chars().count(), "character name too long");
        return Err(QuoteApiError::NameTooLong);
    }

    let Some(resolver) = state.resolver else {
        tracing::error!("quote requested but The One API client is not configured");
        return Err(QuoteApiError::NotConfigured);
    };

    tracing::info!(character = name, "fetching quote");

    match resolver.resolve(name).await {
        Ok(Resolution::Found(mut quote)) => {
            if quote.character.trim().is_empty() {
                quote.character = name.to_string();
            }
            tracing::info!(character = %quote.character, "quote retrieved");
            Ok(Json(quote))
        }
        Ok(Resolution::CharacterNotFound) => {
            tracing::info!(character = name, "no character matched");
            Err(QuoteApiError::NoQuote(name.to_string()))
        }
        Ok(Resolution::NoQuotes { character }) => {
            tracing::info!(character = name, matched = %character, "character has no quotes");
            Err(QuoteApiError::NoQuote(name.to_string()))
        }
        Err(source) => {
            match source.kind() {
                ErrorKind::RateLimited => {
                    tracing::warn!(character = name, "The One API rate limit exceeded");
                }
                _ => tracing::error!(
                    character = name,
                    status = source.status(),
                    error = %source,
                    detail = source.detail().unwrap_or_default(),
                    "The One API error"
                ),
            }
            Err(QuoteApiError::Upstream {
                name: name.to_string(),
                source,
            })
        }
    }
}
