//! Shared test constants

pub const TEST_HOSTNAME: &str = "rktup.org";
pub const TEST_TOKEN: &str = "ghp_test_token";

pub const OWNER: &str = "acme";
pub const REPOSITORY: &str = "widget";

pub const TEMPLATE_URL: &str = "https://dl.example/{crate}";
pub const PUBKEY_URL: &str = "https://dl.example/key";

/// Manifest with both a discovery template and a pubkey
pub const FULL_MANIFEST: &str = r#"{"discovery":{"url_template":"https://dl.example/{crate}"},"pubkey":{"url":"https://dl.example/key"}}"#;

/// Well-formed manifest with an unusable empty template
pub const EMPTY_TEMPLATE_MANIFEST: &str = r#"{"discovery":{"url_template":""}}"#;

/// Something that is not a manifest at all
pub const MALFORMED_MANIFEST: &str = "<html><body>not json</body></html>";
