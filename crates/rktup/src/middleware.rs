//! Request middleware: access logging and request timeouts
//!
//! Kept outside the handlers so the discovery pipeline never deals with
//! logging of responses it produces.

use std::time::Duration;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{info, warn};

use crate::handler::plain_error;

/// Log one line per request with method, status, path and query
pub async fn access_log(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let query = request.uri().query().unwrap_or_default().to_owned();

    let response = next.run(request).await;

    info!(
        "{} {} {}?{}",
        method,
        response.status().as_u16(),
        path,
        query
    );
    response
}

/// Abandon requests that take longer than the configured limit
///
/// Dropping the inner future also drops any outbound manifest fetch.
pub async fn request_timeout(
    State(limit): State<Duration>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();
    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            warn!("request for {:?} timed out after {:?}", path, limit);
            plain_error(StatusCode::GATEWAY_TIMEOUT, "Gateway timeout")
        }
    }
}
