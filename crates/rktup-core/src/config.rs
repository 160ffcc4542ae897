//! Runtime configuration for the discovery service
//!
//! Values come from the command line (see the `rktup` binary) and are passed
//! explicitly into the server, fetcher and resolver constructors.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use crate::error::{Error, Result};

/// Default GitHub REST API base URL
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Default listen address
pub const DEFAULT_ADDR: &str = "127.0.0.1:33333";

/// Default externally visible hostname
pub const DEFAULT_HOSTNAME: &str = "localhost";

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on
    pub addr: SocketAddr,

    /// Discovery settings
    pub discovery: DiscoveryConfig,

    /// Upstream content API settings
    pub github: GitHubConfig,

    /// Grace period for in-flight requests on shutdown
    pub shutdown_timeout: Duration,

    /// Upper bound for handling a single request
    pub request_timeout: Duration,
}

impl ServerConfig {
    /// Create a configuration with defaults for everything but the address
    pub fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            discovery: DiscoveryConfig::default(),
            github: GitHubConfig::default(),
            shutdown_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Parse a listen address string
    pub fn parse_addr(addr: &str) -> Result<SocketAddr> {
        addr.parse()
            .map_err(|e| Error::invalid_config(format!("invalid listen address {addr:?}: {e}")))
    }
}

/// Settings used to build discovery responses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// Hostname under which this service is reachable (e.g. `rktup.org`)
    pub hostname: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            hostname: DEFAULT_HOSTNAME.to_string(),
        }
    }
}

/// GitHub content API settings
#[derive(Clone)]
pub struct GitHubConfig {
    /// API base URL without trailing slash
    pub api_url: String,

    /// Optional API token sent as `Authorization: token ...`
    pub token: Option<String>,

    /// User agent string for outbound requests
    pub user_agent: String,
}

impl GitHubConfig {
    /// Set the API base URL, dropping any trailing slash
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the API token. Empty tokens are treated as absent.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_GITHUB_API_URL.to_string(),
            token: None,
            user_agent: default_user_agent(),
        }
    }
}

impl fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("api_url", &self.api_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

fn default_user_agent() -> String {
    format!("rktup/{}", crate::VERSION)
}
