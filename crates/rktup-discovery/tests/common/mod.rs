//! Common test infrastructure for rktup-discovery tests
//!
//! - `constants`: hostnames, tokens and manifest bodies
//! - `mock_server`: wiremock helpers standing in for the GitHub content API

// Not every test binary uses every helper
#![allow(dead_code)]

pub mod constants;
pub mod mock_server;

pub use constants::*;
pub use mock_server::*;
