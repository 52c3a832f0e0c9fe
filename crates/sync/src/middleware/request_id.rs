//! Request ID middleware for tracing and error correlation.
//!
//! Client-side sync loops retry aggressively when the network flaps, so
//! correlating a retried call with its server-side log lines matters. Every
//! request gets an id: reused from the `x-request-id` header when an upstream
//! proxy already assigned one, freshly generated (UUID v4) otherwise.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Attach a request id to the request's span, the Sentry scope, and the
/// response headers.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = incoming_request_id(&request)
        .map_or_else(|| Uuid::new_v4().to_string(), ToOwned::to_owned);

    Span::current().record("request_id", &request_id);
    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    // Echo the id so clients can quote it when reporting failed syncs
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Request id assigned by an upstream proxy, if any.
fn incoming_request_id(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
}
