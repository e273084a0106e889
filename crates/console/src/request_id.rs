//! Per-request correlation for console API calls.
//!
//! Every request runs inside a `request` span carrying its id, method, path
//! and, once the workspace extractor has run, the calling workspace. The id
//! is echoed in `x-request-id` so callers and webhook senders can match
//! their logs to ours.

use std::time::Instant;

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Longest caller-supplied id that is reused as is.
pub const MAX_REQUEST_ID_LEN: usize = 128;

/// Reuses the caller's id when it is usable, otherwise mints a v4 uuid.
pub fn request_id_from(headers: &HeaderMap) -> String {
    headers
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty() && id.len() <= MAX_REQUEST_ID_LEN)
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Opens the request span and tags the response with the request id.
///
/// `workspace_id` starts empty; `WorkspaceActor` records it.
pub async fn request_id_middleware(request: Request, next: Next) -> Response<Body> {
    let request_id = request_id_from(request.headers());

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
        workspace_id = tracing::field::Empty,
    );

    async move {
        let started = Instant::now();
        let mut response = next.run(request).await;

        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response
                .headers_mut()
                .insert(REQUEST_ID_HEADER.clone(), value);
        }

        tracing::info!(
            status = response.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Handled console request"
        );
        response
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER.clone(), HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_caller_id_reused() {
        assert_eq!(request_id_from(&headers(" stripe-evt-1 ")), "stripe-evt-1");
    }

    #[test]
    fn test_blank_or_oversized_id_replaced() {
        let oversized = "x".repeat(MAX_REQUEST_ID_LEN + 1);
        for value in ["  ", oversized.as_str()] {
            let id = request_id_from(&headers(value));
            assert!(Uuid::parse_str(&id).is_ok(), "{value:?} gave {id}");
        }
        assert!(Uuid::parse_str(&request_id_from(&HeaderMap::new())).is_ok());
    }
}
