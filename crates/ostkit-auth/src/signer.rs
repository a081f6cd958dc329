//! Request signer for building authenticated requests

use tracing::trace;

use crate::canonical::{canonical_get_query, canonical_post_query, Params};
use crate::credentials::Credentials;
use crate::error::{AuthError, AuthResult};

/// A signed GET request target: `path?query&signature=<hex>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedQuery {
    /// Path plus signed query string, to be appended to the base URL
    pub path_and_query: String,
    /// Hex HMAC-SHA256 signature
    pub signature: String,
}

/// A signed POST form body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedForm {
    /// Form-encoded body, `signature` last
    pub body: String,
    /// Hex HMAC-SHA256 signature
    pub signature: String,
}

/// Request signer bound to one set of credentials and one timestamp
#[derive(Debug)]
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
    timestamp: u64,
}

impl<'a> RequestSigner<'a> {
    /// Create a signer stamped with the current time
    pub fn new(credentials: &'a Credentials) -> Self {
        Self::with_timestamp(credentials, Credentials::request_timestamp())
    }

    /// Create a signer with a fixed request timestamp
    pub fn with_timestamp(credentials: &'a Credentials, timestamp: u64) -> Self {
        Self {
            credentials,
            timestamp,
        }
    }

    /// Get the request timestamp for this signer
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Add `api_key` and `request_timestamp` to the caller's parameters
    pub fn authenticated(&self, params: &Params) -> Params {
        params
            .clone()
            .with("api_key", self.api_key())
            .with("request_timestamp", self.timestamp)
    }

    /// Sign a GET request
    pub fn sign_get(&self, path: &str, params: &Params) -> SignedQuery {
        let canonical = canonical_get_query(path, &self.authenticated(params));
        let signature = self.credentials.sign(&canonical);
        trace!(path, "Signed GET request");

        SignedQuery {
            path_and_query: format!("{}&signature={}", canonical, signature),
            signature,
        }
    }

    /// Sign a POST request
    ///
    /// The signature is computed over the canonical string, but the body
    /// itself uses plain form encoding without the canonical fixups.
    pub fn sign_post(&self, path: &str, params: &Params) -> AuthResult<SignedForm> {
        let params = self.authenticated(params);
        let canonical = canonical_post_query(path, &params);
        let signature = self.credentials.sign(&canonical);

        let mut fields = params.pairs();
        fields.push(("signature".to_string(), signature.clone()));
        let body =
            serde_urlencoded::to_string(&fields).map_err(|e| AuthError::Encoding(e.to_string()))?;
        trace!(path, "Signed POST request");

        Ok(SignedForm { body, signature })
    }
}
