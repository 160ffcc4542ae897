//! Per-request data model
//!
//! All of these are created while handling a single discovery request and
//! dropped once the response has been written.

use serde::Serialize;

/// Repository location parsed from the inbound URL path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPath {
    /// Repository owner (user or organization), never empty
    pub owner: String,

    /// Repository name, never empty
    pub repository: String,

    /// Path inside the repository, may be empty or contain further `/`
    pub subpath: String,
}

impl RequestPath {
    /// Create a request path from its parts
    pub fn new(
        owner: impl Into<String>,
        repository: impl Into<String>,
        subpath: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repository: repository.into(),
            subpath: subpath.into(),
        }
    }
}

/// Validated manifest contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// Discovery URL template, never empty
    pub discovery_url_template: String,

    /// Signing key URL, empty when the manifest declares none
    pub pubkey_url: String,
}

/// Payload handed to the discovery page template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveryResponse {
    /// `hostname/owner/repository/subpath`
    pub prefix: String,

    /// Discovery URL template copied from the manifest
    pub template: String,

    /// Signing key URL copied from the manifest
    pub pubkey: String,
}
