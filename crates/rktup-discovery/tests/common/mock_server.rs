//! Mock content API helpers
//!
//! Mounts wiremock endpoints shaped like
//! `/repos/{owner}/{repo}/contents/{subpath}/.rktup.json`.

use rktup_core::{DiscoveryConfig, GitHubConfig};
use rktup_discovery::{DiscoveryResolver, GitHubContentSource};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::constants::*;

/// Path of the manifest for a repository location on the mock server
pub fn manifest_path(owner: &str, repository: &str, subpath: &str) -> String {
    if subpath.is_empty() {
        format!("/repos/{}/{}/contents/.rktup.json", owner, repository)
    } else {
        format!(
            "/repos/{}/{}/contents/{}/.rktup.json",
            owner, repository, subpath
        )
    }
}

/// GitHub settings pointing at the mock server
pub fn github_config(server: &MockServer, token: Option<&str>) -> GitHubConfig {
    GitHubConfig::default()
        .with_api_url(server.uri())
        .with_token(token.map(String::from))
}

/// Content source talking to the mock server
pub fn content_source(server: &MockServer, token: Option<&str>) -> GitHubContentSource {
    GitHubContentSource::new(github_config(server, token)).unwrap()
}

/// Resolver talking to the mock server, announcing `TEST_HOSTNAME`
pub fn resolver(server: &MockServer) -> DiscoveryResolver {
    resolver_with_api(&server.uri())
}

/// Resolver talking to an arbitrary API base URL, announcing `TEST_HOSTNAME`
pub fn resolver_with_api(api_url: &str) -> DiscoveryResolver {
    DiscoveryResolver::github(
        GitHubConfig::default().with_api_url(api_url),
        DiscoveryConfig {
            hostname: TEST_HOSTNAME.to_string(),
        },
    )
    .unwrap()
}

/// Serve a manifest body with status 200 at the given location
pub async fn mock_manifest(server: &MockServer, subpath: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(manifest_path(OWNER, REPOSITORY, subpath)))
        .and(header("accept", "application/vnd.github.VERSION.raw"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Answer every manifest request at the given location with a bare status
pub async fn mock_manifest_status(server: &MockServer, subpath: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(manifest_path(OWNER, REPOSITORY, subpath)))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Start a raw TCP upstream that promises a long body, sends a few bytes of
/// it and then closes the connection. Returns its base URL.
pub async fn truncated_body_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let _ = socket
                    .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 1000\r\n\r\n{\"disc")
                    .await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{}", addr)
}
