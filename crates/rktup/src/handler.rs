//! Request handling for the index and discovery routes

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use rktup_core::PageTemplates;
use rktup_discovery::DiscoveryResolver;
use tracing::{debug, error};

/// Query parameter selecting the discovery route
const DISCOVERY_PARAM: &str = "ac-discovery";

/// Shared, read-only state for all requests
#[derive(Clone)]
pub struct AppState {
    resolver: DiscoveryResolver,
    templates: Arc<PageTemplates>,
}

impl AppState {
    pub fn new(resolver: DiscoveryResolver, templates: PageTemplates) -> Self {
        Self {
            resolver,
            templates: Arc::new(templates),
        }
    }
}

/// Entry point for every request
pub async fn handle(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    if method != Method::GET {
        return plain_error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
    }

    if discovery_requested(uri.query()) {
        return discovery(&state, uri.path()).await;
    }

    match uri.path() {
        "" | "/" | "/index.html" => index(&state),
        _ => plain_error(StatusCode::NOT_FOUND, "Not found"),
    }
}

fn index(state: &AppState) -> Response {
    match state.templates.render_index(state.resolver.hostname()) {
        Ok(page) => Html(page).into_response(),
        Err(err) => {
            error!("failed to render index page: {}", err);
            plain_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

async fn discovery(state: &AppState, raw_path: &str) -> Response {
    let path = match urlencoding::decode(raw_path) {
        Ok(path) => path,
        Err(err) => {
            debug!(path = raw_path, "path is not valid percent-encoded UTF-8: {}", err);
            return plain_error(StatusCode::BAD_REQUEST, "Bad request");
        }
    };

    let response = match state.resolver.resolve(&path).await {
        Ok(response) => response,
        Err(err) => return plain_error(err.status_code(), err.public_message()),
    };

    match state.templates.render_discovery(&response) {
        Ok(page) => Html(page).into_response(),
        Err(err) => {
            error!("failed to render discovery page for {:?}: {}", path, err);
            plain_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

/// Plain-text error body carrying only a generic message
pub fn plain_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        ],
        format!("{}\n", message),
    )
        .into_response()
}

/// Whether the first `ac-discovery` query value is `1`.
///
/// Keys and values are form-decoded. Pairs that do not decode to UTF-8 are
/// skipped.
fn discovery_requested(query: Option<&str>) -> bool {
    query
        .unwrap_or_default()
        .split('&')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = form_decode(key)?;
            (key == DISCOVERY_PARAM).then(|| form_decode(value))?
        })
        .next()
        .is_some_and(|value| value == "1")
}

/// Decode one `application/x-www-form-urlencoded` component
fn form_decode(component: &str) -> Option<String> {
    urlencoding::decode(&component.replace('+', " "))
        .ok()
        .map(|decoded| decoded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovery_requested() {
        assert!(discovery_requested(Some("ac-discovery=1")));
        assert!(discovery_requested(Some("foo=bar&ac-discovery=1")));
        assert!(!discovery_requested(None));
        assert!(!discovery_requested(Some("")));
        assert!(!discovery_requested(Some("ac-discovery=0")));
        assert!(!discovery_requested(Some("ac-discovery")));
        assert!(!discovery_requested(Some("xac-discovery=1")));
    }

    #[test]
    fn test_first_discovery_value_wins() {
        assert!(discovery_requested(Some("ac-discovery=1&ac-discovery=0")));
        assert!(!discovery_requested(Some("ac-discovery=0&ac-discovery=1")));
    }

    #[test]
    fn test_discovery_query_is_decoded() {
        assert!(discovery_requested(Some("ac-discovery=%31")));
        assert!(discovery_requested(Some("ac%2Ddiscovery=1")));
        assert!(discovery_requested(Some("q=a+b&ac-discovery=1")));
        assert!(!discovery_requested(Some("ac-discovery=%32")));
        assert!(!discovery_requested(Some("ac-discovery=1+")));
    }

    #[test]
    fn test_undecodable_pairs_are_skipped() {
        assert!(discovery_requested(Some("%FF=1&ac-discovery=1")));
        assert!(!discovery_requested(Some("ac-discovery=%FF")));
    }
}
