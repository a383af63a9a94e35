use std::time::Duration;

use axum::{body::Body, extract::Request, response::Response};
use tracing::Span;
use uuid::Uuid;

/// Open a span per request, tagged with a fresh request id so log lines
/// from concurrent requests can be told apart.
pub fn make_span_with_request_id(request: &Request<Body>) -> Span {
    let request_id = Uuid::new_v4();
    tracing::span!(
        tracing::Level::INFO,
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

pub fn on_request(_request: &Request<Body>, _span: &Span) {
    tracing::event!(tracing::Level::INFO, "started processing request");
}

pub fn on_response(response: &Response, latency: Duration, _span: &Span) {
    let status = response.status();
    let level = if status.is_server_error() {
        tracing::Level::ERROR
    } else {
        tracing::Level::INFO
    };

    match level {
        tracing::Level::ERROR => tracing::event!(
            tracing::Level::ERROR,
            status = status.as_u16(),
            latency = ?latency,
            "finished processing request",
        ),
        _ => tracing::event!(
            tracing::Level::INFO,
            status = status.as_u16(),
            latency = ?latency,
            "finished processing request",
        ),
    }
}
