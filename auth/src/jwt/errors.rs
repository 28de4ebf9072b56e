use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    /// Signature and structure are valid but the expiry has passed.
    #[error("Token is expired")]
    TokenExpired,

    /// Bad signature, wrong secret, tampered payload, unexpected algorithm,
    /// or a missing or unparseable expiry.
    #[error("Token is invalid: {0}")]
    TokenInvalid(String),
}
