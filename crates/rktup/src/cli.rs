//! CLI argument parsing with clap

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use rktup_core::config::{DEFAULT_ADDR, DEFAULT_GITHUB_API_URL, DEFAULT_HOSTNAME};
use rktup_core::{DiscoveryConfig, GitHubConfig, ServerConfig};

/// rktup - ac-discovery for container images hosted alongside GitHub repositories
#[derive(Parser)]
#[command(name = "rktup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Address to listen on
    #[arg(long, env = "RKTUP_ADDR", default_value = DEFAULT_ADDR)]
    pub addr: String,

    /// Hostname to use in discovery prefixes (e.g. rktup.org)
    #[arg(long, env = "RKTUP_HOSTNAME", default_value = DEFAULT_HOSTNAME)]
    pub hostname: String,

    /// GitHub API token
    #[arg(long, env = "RKTUP_GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// GitHub API base URL
    #[arg(long, env = "RKTUP_GITHUB_API_URL", default_value = DEFAULT_GITHUB_API_URL)]
    pub github_api_url: String,

    /// Seconds to wait for in-flight requests on shutdown
    #[arg(long, value_name = "SECS", default_value_t = 5)]
    pub shutdown_timeout: u64,

    /// Seconds after which a request is abandoned
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub request_timeout: u64,
}

impl Cli {
    /// Build the server configuration from the parsed flags
    pub fn server_config(&self) -> Result<ServerConfig> {
        let mut config = ServerConfig::new(ServerConfig::parse_addr(&self.addr)?);

        config.discovery = DiscoveryConfig {
            hostname: self.hostname.clone(),
        };
        config.github = GitHubConfig::default()
            .with_api_url(self.github_api_url.as_str())
            .with_token(self.github_token.clone());
        config.shutdown_timeout = Duration::from_secs(self.shutdown_timeout);
        config.request_timeout = Duration::from_secs(self.request_timeout);

        Ok(config)
    }
}
