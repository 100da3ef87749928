//! Per-request correlation id.
//!
//! Reuses a client-supplied `x-request-id` or mints a UUID, wraps the handler
//! in a tracing span carrying it so every log line of the request (including
//! `AppError` logs) is tagged, and echoes it back on the response.

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Longest client-supplied id that is accepted as is.
const MAX_CLIENT_ID_LEN: usize = 128;

fn client_request_id(request: &Request) -> Option<String> {
    request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty() && id.len() <= MAX_CLIENT_ID_LEN)
        .map(String::from)
}

pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let id = client_request_id(&request).unwrap_or_else(|| Uuid::new_v4().to_string());

    let span = tracing::info_span!(
        "request",
        request_id = %id,
        method = %request.method(),
        path = %request.uri().path(),
    );

    async move {
        let mut response = next.run(request).await;
        tracing::info!(status = response.status().as_u16(), "Request completed");

        if let Ok(value) = HeaderValue::from_str(&id) {
            response.headers_mut().insert(REQUEST_ID_HEADER.clone(), value);
        }
        response
    }
    .instrument(span)
    .await
}
