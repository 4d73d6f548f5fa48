//! Router assembly shared by `main` and the integration tests.

use std::{any::Any, sync::Arc};

use axum::{
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Extension, Json, Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any as AnyHeader, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::{CorsConfig, SwaggerConfig, TheOneApiConfig};
use crate::quotes::{self, QuoteResolver, QuotesState};
use crate::rest::{self, ApiDoc, ErrorBody, INTERNAL_ERROR_DETAIL};
use crate::the_one_api::HttpTheOneApiClient;

/// Build the quote state from configuration.
///
/// A missing API key is logged, not fatal: the service starts and the quote
/// route answers 500 until a key is configured.
#[must_use]
pub fn quotes_state(config: &TheOneApiConfig) -> QuotesState {
    match HttpTheOneApiClient::from_config(config) {
        Ok(client) => {
            tracing::info!(base_url = %config.base_url, "The One API client configured");
            QuotesState::new(QuoteResolver::new(Arc::new(client)))
        }
        Err(e) => {
            tracing::warn!(error = %e, "The One API client not configured - quote requests will fail");
            QuotesState::unconfigured()
        }
    }
}

/// Build CORS layer from config.
#[must_use]
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let cors_origins = &config.allowed_origins;
    let allow_origin: AllowOrigin = if cors_origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow any origin - not recommended for production");
        AllowOrigin::any()
    } else if cors_origins.is_empty() {
        tracing::info!(
            "CORS allowed origins not configured - cross-origin requests will be blocked"
        );
        AllowOrigin::list(Vec::<HeaderValue>::new())
    } else {
        let origins: Vec<HeaderValue> = cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        tracing::info!(origins = ?cors_origins, "CORS allowed origins configured");
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(AnyHeader)
        .allow_origin(allow_origin)
}

#[allow(clippy::needless_pass_by_value)] // CatchPanicLayer hands over the payload
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = message, "request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            detail: INTERNAL_ERROR_DETAIL.to_string(),
        }),
    )
        .into_response()
}

/// Assemble the full application.
///
/// Layer order (innermost first): routes, state extension, CORS, request
/// tracing, panic catching.
pub fn build_app(state: QuotesState, cors: &CorsConfig, swagger: &SwaggerConfig) -> Router {
    let mut app = Router::new()
        .merge(quotes::http::router())
        .route("/health", get(rest::health_check));

    if swagger.enabled {
        app = app
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
            .route("/", get(|| async { Redirect::temporary("/swagger-ui") }));
    }

    app.layer(Extension(state))
        .layer(cors_layer(cors))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
}
