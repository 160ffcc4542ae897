//! Page templates for the index and discovery routes
//!
//! Templates are embedded at compile time and parsed once at startup.

use serde::Serialize;
use tera::{Context, Tera};
use tracing::debug;

use crate::error::Result;
use crate::types::DiscoveryResponse;

const INDEX_TEMPLATE: &str = "index.html";
const DISCOVERY_TEMPLATE: &str = "ac-discovery.html";

/// Context for the index page
#[derive(Debug, Serialize)]
struct IndexContext<'a> {
    version: &'a str,
    hostname: &'a str,
}

/// Registry holding the parsed page templates
pub struct PageTemplates {
    tera: Tera,
}

impl PageTemplates {
    /// Parse the embedded templates
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (INDEX_TEMPLATE, include_str!("index.html.tera")),
            (DISCOVERY_TEMPLATE, include_str!("ac-discovery.html.tera")),
        ])?;
        tera.set_escape_fn(escape_attribute);

        Ok(Self { tera })
    }

    /// Render the landing page
    pub fn render_index(&self, hostname: &str) -> Result<String> {
        let context = Context::from_serialize(IndexContext {
            version: crate::VERSION,
            hostname,
        })?;
        Ok(self.tera.render(INDEX_TEMPLATE, &context)?)
    }

    /// Render the ac-discovery document for a resolved repository
    pub fn render_discovery(&self, response: &DiscoveryResponse) -> Result<String> {
        debug!("Rendering discovery page for prefix: {}", response.prefix);
        let context = Context::from_serialize(response)?;
        Ok(self.tera.render(DISCOVERY_TEMPLATE, &context)?)
    }
}

/// HTML escaping that leaves `/` alone so URLs stay readable in attributes
fn escape_attribute(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&#34;"),
            '\'' => output.push_str("&#39;"),
            _ => output.push(c),
        }
    }
    output
}
