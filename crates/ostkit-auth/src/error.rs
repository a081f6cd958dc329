//! Error types for credential handling and request signing

/// Errors that can occur while building or signing requests
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Invalid API credentials
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    /// Form body could not be encoded
    #[error("Encoding error: {0}")]
    Encoding(String),
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
