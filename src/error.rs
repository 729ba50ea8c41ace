//! Error types for adr-index
//!
//! Only the I/O side of the crate can fail: configuration validation and the
//! document fetchers. Parsing, aggregation and rendering are total and never
//! produce an [`Error`].

use thiserror::Error;

/// Result type alias for adr-index operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for adr-index
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "repository.namespace")
        key: Option<String>,
    },

    /// Transport-level network error (connect, timeout, body read)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Remote endpoint answered with a non-success HTTP status
    #[error("HTTP {status} from {url}")]
    Http {
        /// HTTP status code returned by the server
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// JSON (de)serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The GraphQL endpoint reported errors in its response body
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    /// The remote response was well-formed JSON but not the expected shape
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// A configured or derived URL could not be parsed
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Build a configuration error for the given key
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }

    /// The configuration key this error refers to, if any
    pub fn config_key(&self) -> Option<&str> {
        match self {
            Error::Config { key, .. } => key.as_deref(),
            _ => None,
        }
    }
}
