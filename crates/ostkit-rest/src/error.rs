//! Error types for REST API operations
//!
//! Every kind propagates straight to the caller. Nothing here is retried by
//! the client, and a failed page discards any pages fetched before it.

use ostkit_auth::AuthError;

use crate::transport::TransportError;
use crate::validation::ValidationError;

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// Client-side input check failed; no request was sent
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The HTTP call could not complete
    #[error("Transport failure for {url}: {source}")]
    Transport {
        /// Attempted URL (base URL + path, no query)
        url: String,
        #[source]
        source: TransportError,
    },

    /// API returned `success: false`
    #[error("API error: {message}")]
    Api {
        /// Vendor-supplied message from `err.msg`
        message: String,
        /// Vendor error code from `err.code`, if any
        code: Option<String>,
        /// Offending URL (GET requests only)
        url: Option<String>,
    },

    /// Response body was not valid JSON
    #[error("Malformed response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },

    /// Envelope lacked a field the client needs
    #[error("Unexpected response shape: {0}")]
    UnexpectedResponseShape(String),

    /// Fetch-all gave up after the configured number of pages
    #[error("Pagination did not terminate within {max_pages} pages")]
    PageLimitExceeded { max_pages: usize },

    /// Invalid or missing credentials
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Client could not be configured
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl RestError {
    /// Create an unexpected-shape error
    pub fn shape(reason: impl Into<String>) -> Self {
        Self::UnexpectedResponseShape(reason.into())
    }

    /// Check if this error was raised before any network I/O
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error came from the transport layer
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Check if the API rejected the request
    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// Vendor message, if this is an API error
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
