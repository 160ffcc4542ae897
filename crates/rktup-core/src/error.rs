//! Error types for rktup-core

use thiserror::Error;

/// Result type alias using rktup-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for rktup
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration value
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Template loading or rendering error
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
}

impl Error {
    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
