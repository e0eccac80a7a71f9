//! Error types for the Shippo API client.
//!
//! # Design
//! Every failure is returned to the caller as soon as it happens; nothing is
//! retried or swallowed. Non-2xx responses carry only the numeric status in
//! `HttpStatus`. The body is not inspected, so callers that need to tell a
//! 4xx from a 5xx look at the code themselves.

use thiserror::Error;

/// Boxed error produced by a list item handler.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by `ShippoClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request payload could not be serialized to JSON.
    #[error("failed to serialize request body: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The request target is not an absolute URL.
    #[error("invalid request URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The HTTP exchange failed below the status-code level (DNS, refused
    /// connection, truncated body, ...).
    #[error("HTTP request failed: {0}")]
    Network(#[from] ureq::Error),

    /// The server answered with a status outside `[200, 300)`.
    #[error("unexpected HTTP status {status}")]
    HttpStatus { status: u16 },

    /// The response body was not valid JSON for the expected type.
    #[error("failed to deserialize response body (HTTP {status}): {source}")]
    Deserialization {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// A list item handler failed; the original error is the source.
    #[error("list item handler failed: {0}")]
    Callback(#[source] BoxError),

    /// Pagination went past `ClientConfig::max_pages`.
    #[error("pagination exceeded the limit of {limit} pages")]
    PageLimitExceeded { limit: usize },

    /// Required configuration is missing or unusable.
    #[error("configuration error: {0}")]
    Config(String),

    /// An object id was empty, which would address the collection instead.
    #[error("object id must not be empty")]
    EmptyObjectId,
}

impl ApiError {
    /// HTTP status associated with the error, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus { status } | ApiError::Deserialization { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

/// Result type alias for Shippo client operations.
pub type Result<T> = std::result::Result<T, ApiError>;
