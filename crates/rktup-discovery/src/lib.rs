//! Discovery resolution pipeline for rktup
//!
//! Provides:
//! - Manifest fetching from the GitHub content API
//! - Manifest validation
//! - Discovery response rendering
//! - The resolver tying these together and mapping failures to HTTP outcomes

pub mod fetcher;
pub mod manifest;
pub mod render;
pub mod resolver;

pub use fetcher::{ContentSource, FetchError, GitHubContentSource};
pub use manifest::{validate_manifest, ValidationError};
pub use render::render_discovery;
pub use resolver::{DiscoveryResolver, InternalCause, ResolveError};
