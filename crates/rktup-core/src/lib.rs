//! # rktup-core
//!
//! Core library for the rktup discovery service providing:
//! - Configuration types threaded through the server and resolver
//! - The per-request data model (request path, manifest, discovery response)
//! - Request path parsing into owner / repository / subpath
//! - Embedded HTML page templates

pub mod config;
pub mod error;
pub mod path;
pub mod templates;
pub mod types;

pub use config::{DiscoveryConfig, GitHubConfig, ServerConfig};
pub use error::{Error, Result};
pub use path::{parse_request_path, ParseError};
pub use templates::PageTemplates;
pub use types::{DiscoveryResponse, Manifest, RequestPath};

/// Current rktup version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the manifest file looked up next to the repository content
pub const MANIFEST_FILE_NAME: &str = ".rktup.json";
