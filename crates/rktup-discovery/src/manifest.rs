//! Manifest validation
//!
//! A manifest is a small JSON document:
//!
//! ```json
//! {
//!   "discovery": { "url_template": "https://dl.example/{name}-{version}.{ext}" },
//!   "pubkey": { "url": "https://dl.example/pubkeys.gpg" }
//! }
//! ```
//!
//! Both groups are optional in the document, but a manifest without a
//! discovery template cannot be used.

use rktup_core::Manifest;
use serde::Deserialize;
use thiserror::Error;

/// Errors from validating a fetched manifest
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Not a JSON document of the expected shape
    #[error("malformed manifest: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Well-formed, but `discovery.url_template` is empty
    #[error("manifest discovery url template is empty")]
    MissingTemplate,
}

/// Manifest file as stored in the repository
#[derive(Debug, Default, Deserialize)]
struct ManifestFile {
    #[serde(default)]
    discovery: Option<DiscoverySection>,

    #[serde(default)]
    pubkey: Option<PubkeySection>,
}

#[derive(Debug, Default, Deserialize)]
struct DiscoverySection {
    #[serde(default)]
    url_template: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PubkeySection {
    #[serde(default)]
    url: Option<String>,
}

/// Parse and validate raw manifest bytes
pub fn validate_manifest(bytes: &[u8]) -> Result<Manifest, ValidationError> {
    let file: ManifestFile = serde_json::from_slice(bytes)?;

    let discovery_url_template = file
        .discovery
        .and_then(|d| d.url_template)
        .unwrap_or_default();
    if discovery_url_template.is_empty() {
        return Err(ValidationError::MissingTemplate);
    }

    let pubkey_url = file.pubkey.and_then(|p| p.url).unwrap_or_default();

    Ok(Manifest {
        discovery_url_template,
        pubkey_url,
    })
}
