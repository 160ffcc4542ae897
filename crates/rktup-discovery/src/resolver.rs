//! Discovery resolution
//!
//! Runs parse, fetch, validate and render in order. Each request ends in
//! exactly one of: a `DiscoveryResponse`, `BadRequest`, `NotFound` or
//! `InternalError`. Failures are logged here with full context; callers only
//! get the status code and a generic message to show to clients.

use std::sync::Arc;

use reqwest::StatusCode;
use rktup_core::{
    parse_request_path, DiscoveryConfig, DiscoveryResponse, GitHubConfig, ParseError,
};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::fetcher::{ContentSource, FetchError, GitHubContentSource};
use crate::manifest::{validate_manifest, ValidationError};
use crate::render::render_discovery;

/// Terminal failure states of a resolution
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The request path does not name a repository
    #[error("bad request: {0}")]
    BadRequest(ParseError),

    /// No manifest at the resolved location
    #[error("not found: {0}")]
    NotFound(FetchError),

    /// Anything that is not the client's fault
    #[error("internal error: {0}")]
    InternalError(InternalCause),
}

/// Underlying reason for an `InternalError`
#[derive(Error, Debug)]
pub enum InternalCause {
    /// Upstream fetch failed
    #[error(transparent)]
    Fetch(FetchError),

    /// The manifest could not be used
    #[error(transparent)]
    Manifest(ValidationError),
}

impl ResolveError {
    /// HTTP status code to answer with
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Generic message safe to show to clients
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "Bad request",
            Self::NotFound(_) => "Not found",
            Self::InternalError(_) => "Internal server error",
        }
    }
}

impl From<FetchError> for ResolveError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::NotFound { .. } => Self::NotFound(err),
            // A rejected token is our misconfiguration, not the client's
            FetchError::Unauthorized { .. }
            | FetchError::UpstreamError { .. }
            | FetchError::Transport { .. }
            | FetchError::BodyReadFailed { .. } => Self::InternalError(InternalCause::Fetch(err)),
        }
    }
}

impl From<ValidationError> for ResolveError {
    fn from(err: ValidationError) -> Self {
        Self::InternalError(InternalCause::Manifest(err))
    }
}

/// Resolves request paths into discovery responses
#[derive(Clone)]
pub struct DiscoveryResolver {
    source: Arc<dyn ContentSource>,
    config: DiscoveryConfig,
}

impl DiscoveryResolver {
    /// Create a resolver over any content source
    pub fn new(source: Arc<dyn ContentSource>, config: DiscoveryConfig) -> Self {
        Self { source, config }
    }

    /// Create a resolver backed by the GitHub content API
    pub fn github(github: GitHubConfig, config: DiscoveryConfig) -> reqwest::Result<Self> {
        let source = GitHubContentSource::new(github)?;
        Ok(Self::new(Arc::new(source), config))
    }

    /// Hostname used as the discovery prefix
    pub fn hostname(&self) -> &str {
        &self.config.hostname
    }

    /// Resolve a raw request path
    pub async fn resolve(&self, request_path: &str) -> Result<DiscoveryResponse, ResolveError> {
        let location = parse_request_path(request_path).map_err(|err| {
            info!("bad path {:?}: {}", request_path, err);
            ResolveError::BadRequest(err)
        })?;

        let body = match self.source.fetch_manifest(&location).await {
            Ok(body) => body,
            Err(err) => {
                let err = ResolveError::from(err);
                match err {
                    ResolveError::InternalError(_) => error!(path = request_path, "{}", err),
                    _ => info!(path = request_path, "{}", err),
                }
                return Err(err);
            }
        };

        let manifest = validate_manifest(&body).map_err(|err| {
            error!(
                path = request_path,
                url = %self.source.manifest_url(&location),
                "{}",
                err
            );
            ResolveError::from(err)
        })?;

        let response = render_discovery(&self.config.hostname, &location, &manifest);
        debug!(
            "Resolved {} to prefix {} with template {}",
            request_path, response.prefix, response.template
        );
        Ok(response)
    }
}
