//! Error types for ddns-updater.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for ddns-updater.
pub type Result<T> = std::result::Result<T, DdnsError>;

/// Everything that can abort a run.
#[derive(Error, Debug)]
pub enum DdnsError {
    /// A required setting was empty after all layers were merged.
    #[error("Namecheap {field} must be specified! Remember to specify it with {flag}")]
    MissingField {
        field: &'static str,
        flag: &'static str,
    },

    /// Configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read cache file {}: {source}", path.display())]
    CacheRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write to cache file {}: {source}", path.display())]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Every IP resolver endpoint failed.
    #[error("Failed to resolve IP using any provided ip resolvers!")]
    ResolutionExhausted,

    #[error("Failed to make ddns update request: {0}")]
    UpdateTransport(String),

    #[error("Request returned non 200 status code: {0}")]
    UpdateStatus(reqwest::StatusCode),

    /// The provider answered with something other than the expected XML.
    #[error("Failed to parse namecheap response: {0}")]
    UpdateResponseParse(String),

    /// The provider reported one or more errors.
    #[error("Namecheap api returned error(s): {0}")]
    UpdateProvider(String),

    /// HTTP client setup failed.
    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for DdnsError {
    fn from(e: reqwest::Error) -> Self {
        DdnsError::Network(e.to_string())
    }
}

impl From<serde_yaml::Error> for DdnsError {
    fn from(e: serde_yaml::Error) -> Self {
        DdnsError::Config(e.to_string())
    }
}
