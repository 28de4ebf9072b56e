use thiserror::Error;

/// Error type for password operations.
///
/// A password that does not match its hash is not an error; `verify`
/// reports it as `Ok(false)`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password must not be empty")]
    EmptyPassword,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// The stored hash cannot be parsed or uses unsupported parameters.
    #[error("Stored password hash is malformed: {0}")]
    CryptoFailure(String),

    #[error("Password hashing worker failed: {0}")]
    WorkerFailed(String),
}
