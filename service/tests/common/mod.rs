//! Common test utilities for integration tests.
//!
//! - [`app_builder::TestAppBuilder`] - Build test Axum apps that mirror main.rs wiring
//! - [`http_mock::MockHttpServer`] - Stub The One API over real HTTP
//! - [`send_get`] - Issue a GET through `oneshot` and decode the JSON body

#![allow(dead_code)]

pub mod app_builder;
pub mod http_mock;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

/// Send `GET uri` and return the status with the JSON body (`Null` if the
/// body is empty or not JSON).
pub async fn send_get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    let status = response.status();
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body");
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);

    (status, json)
}

/// Upstream character document.
pub fn character_doc(id: &str, name: &str) -> Value {
    serde_json::json!({
        "_id": id,
        "name": name,
        "race": "Maiar",
        "wikiUrl": format!("http://lotr.wikia.com//wiki/{name}")
    })
}

/// Upstream quote document; `dialog: None` omits the field.
pub fn quote_doc(id: &str, dialog: Option<&str>, movie: &str, character: &str) -> Value {
    let mut doc = serde_json::json!({
        "_id": id,
        "movie": movie,
        "character": character
    });
    if let Some(dialog) = dialog {
        doc["dialog"] = Value::String(dialog.to_string());
    }
    doc
}

/// Wrap documents in the upstream pagination envelope.
pub fn envelope(docs: Vec<Value>) -> Value {
    let total = docs.len();
    serde_json::json!({
        "docs": docs,
        "total": total,
        "limit": 1000,
        "offset": 0,
        "page": 1,
        "pages": 1
    })
}
