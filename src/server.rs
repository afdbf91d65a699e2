//! HTTP surface: the front-end page, the question endpoint, and a health probe.
//!
//! | Route | Method | Body |
//! |-------|--------|------|
//! | `/` | GET | single-page front-end |
//! | `/api/assistant` | POST | `{"query": "..."}` → one of the [`Outcome`](crate::Outcome) JSON shapes |
//! | `/api/assistant` | OPTIONS | 204, CORS preflight |
//! | `/health` | GET | status and model summary |

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderValue, StatusCode};
use axum::middleware;
use axum::response::{Html, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::classify::EMPTY_QUERY_MESSAGE;
use crate::error::Result;
use crate::Assistant;

const INDEX_HTML: &str = include_str!("../static/index.html");

#[derive(Debug, Default, Deserialize)]
struct AskRequest {
    #[serde(default)]
    query: Option<String>,
}

/// Build the application router.
pub fn router(assistant: Arc<Assistant>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route(
            "/api/assistant",
            post(ask_handler).options(preflight_handler),
        )
        .route("/health", get(health_handler))
        .layer(middleware::map_response(add_cors_headers))
        .with_state(assistant)
}

/// Serve until Ctrl-C.
pub async fn serve(listener: TcpListener, assistant: Arc<Assistant>) -> Result<()> {
    axum::serve(listener, router(assistant))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

async fn add_cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    response
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn preflight_handler() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Read `query` leniently: a body that is not a JSON object with a string
/// `query` counts as an empty query.
fn extract_query(body: &[u8]) -> String {
    serde_json::from_slice::<AskRequest>(body)
        .unwrap_or_default()
        .query
        .map(|q| q.trim().to_string())
        .unwrap_or_default()
}

async fn ask_handler(State(assistant): State<Arc<Assistant>>, body: Bytes) -> Json<Value> {
    let query = extract_query(&body);
    if query.is_empty() {
        return Json(json!({ "response": EMPTY_QUERY_MESSAGE }));
    }
    Json(assistant.answer(&query).await.to_json())
}

async fn health_handler(State(assistant): State<Arc<Assistant>>) -> Json<Value> {
    Json(json!({
        "status": "infosec-assistant is running",
        "model": {
            "name": assistant.model,
            "configured": assistant.is_configured(),
            "backend": assistant.backend_name(),
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_query_trims() {
        assert_eq!(extract_query(r#"{"query": "  фишинг  "}"#.as_bytes()), "фишинг");
    }

    #[test]
    fn test_extract_query_lenient() {
        assert_eq!(extract_query(b""), "");
        assert_eq!(extract_query(b"not json"), "");
        assert_eq!(extract_query(br#"{}"#), "");
        assert_eq!(extract_query(br#"{"query": null}"#), "");
        assert_eq!(extract_query(br#"{"query": 42}"#), "");
    }

    #[test]
    fn test_index_page_posts_to_api() {
        assert!(INDEX_HTML.contains("/api/assistant"));
    }
}
