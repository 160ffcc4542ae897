//! Discovery response rendering

use rktup_core::path::join_path;
use rktup_core::{DiscoveryResponse, Manifest, RequestPath};

/// Build the discovery response for a validated manifest
///
/// The template is passed through untouched; its placeholders are filled in
/// by the client.
pub fn render_discovery(
    hostname: &str,
    location: &RequestPath,
    manifest: &Manifest,
) -> DiscoveryResponse {
    DiscoveryResponse {
        prefix: join_path([
            hostname,
            location.owner.as_str(),
            location.repository.as_str(),
            location.subpath.as_str(),
        ]),
        template: manifest.discovery_url_template.clone(),
        pubkey: manifest.pubkey_url.clone(),
    }
}
