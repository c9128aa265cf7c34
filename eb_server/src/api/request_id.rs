//! Request ID middleware for tracing and debugging.
//!
//! Every request gets a correlation id (client-provided or generated) that is
//! echoed in the response headers and attached to the request log lines. The
//! same middleware records the per-request HTTP metrics.

use std::time::Instant;

use axum::{
    extract::Request,
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::metrics;

/// Header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Generate or extract request ID from headers
fn get_or_generate_request_id(headers: &axum::http::HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Request ID wrapper stored in request extensions
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

/// Middleware to add a request ID to all requests and responses
///
/// This middleware:
/// 1. Extracts an existing request ID from the header or generates a new one
/// 2. Logs request start and completion with the ID
/// 3. Adds the request ID to response headers
/// 4. Records request count and duration metrics
pub async fn request_id_middleware(
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let request_id = get_or_generate_request_id(request.headers());
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    tracing::info!(
        request_id = %request_id,
        method = %method,
        uri = %request.uri(),
        "Request started"
    );

    let response = next.run(request).await;

    let (mut parts, body) = response.into_parts();
    if let Ok(header_value) = HeaderValue::from_str(&request_id) {
        parts.headers.insert(REQUEST_ID_HEADER, header_value);
    }

    let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
    metrics::http_requests_total(method.as_str(), &path, parts.status.as_u16());
    metrics::http_request_duration_ms(method.as_str(), &path, duration_ms);

    tracing::info!(
        request_id = %request_id,
        status = %parts.status,
        duration_ms = duration_ms,
        "Request completed"
    );

    Ok(Response::from_parts(parts, body))
}
