//! Manifest retrieval from the GitHub content API
//!
//! One GET per call, no retries. The status code decides the outcome:
//! 200 is success, 404 and 401 have their own errors, everything else is
//! reported as an unexpected upstream status.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use rktup_core::{GitHubConfig, RequestPath, MANIFEST_FILE_NAME};
use thiserror::Error;
use tracing::debug;

/// Media type asking the content API for the raw file instead of JSON metadata
pub const RAW_CONTENT_MEDIA_TYPE: &str = "application/vnd.github.VERSION.raw";

/// Errors from fetching a manifest
#[derive(Error, Debug)]
pub enum FetchError {
    /// No manifest at the resolved location
    #[error("manifest not found at {url}")]
    NotFound { url: String },

    /// The content API rejected our credentials
    #[error("got unauthorized from content API for {url}")]
    Unauthorized { url: String },

    /// Any other non-200 status
    #[error("unexpected HTTP status from content API for {url}: {status}")]
    UpstreamError { url: String, status: u16 },

    /// Network or transport failure before a status was received
    #[error("failed to query content API at {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The 200 response body could not be read
    #[error("failed to read response body from {url}: {source}")]
    BodyReadFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Source of raw manifest bytes for a repository location
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Location the manifest is fetched from, used for diagnostics
    fn manifest_url(&self, location: &RequestPath) -> String;

    /// Fetch the raw manifest bytes
    async fn fetch_manifest(&self, location: &RequestPath) -> Result<Bytes, FetchError>;
}

/// Content source backed by the GitHub repository contents API
///
/// Holds one `reqwest::Client` for the lifetime of the process so
/// connections are pooled across requests.
pub struct GitHubContentSource {
    client: reqwest::Client,
    config: GitHubConfig,
}

impl GitHubContentSource {
    /// Create a content source with its own HTTP client
    pub fn new(config: GitHubConfig) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Create a content source reusing an existing HTTP client
    pub fn with_client(client: reqwest::Client, config: GitHubConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl ContentSource for GitHubContentSource {
    fn manifest_url(&self, location: &RequestPath) -> String {
        // An empty subpath would otherwise leave "contents//.rktup.json"
        if location.subpath.is_empty() {
            format!(
                "{}/repos/{}/{}/contents/{}",
                self.config.api_url, location.owner, location.repository, MANIFEST_FILE_NAME
            )
        } else {
            format!(
                "{}/repos/{}/{}/contents/{}/{}",
                self.config.api_url,
                location.owner,
                location.repository,
                location.subpath,
                MANIFEST_FILE_NAME
            )
        }
    }

    async fn fetch_manifest(&self, location: &RequestPath) -> Result<Bytes, FetchError> {
        let url = self.manifest_url(location);
        debug!("Fetching manifest from: {}", url);

        let mut request = self.client.get(&url).header(ACCEPT, RAW_CONTENT_MEDIA_TYPE);
        if let Some(token) = &self.config.token {
            request = request.header(AUTHORIZATION, format!("token {}", token));
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(source) => return Err(FetchError::Transport { url, source }),
        };

        match response.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => return Err(FetchError::NotFound { url }),
            StatusCode::UNAUTHORIZED => return Err(FetchError::Unauthorized { url }),
            status => {
                return Err(FetchError::UpstreamError {
                    url,
                    status: status.as_u16(),
                })
            }
        }

        match response.bytes().await {
            Ok(body) => {
                debug!("Fetched {} byte manifest from {}", body.len(), url);
                Ok(body)
            }
            Err(source) => Err(FetchError::BodyReadFailed { url, source }),
        }
    }
}
