use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error(
        "Username contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
    )]
    InvalidCharacters,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for FullName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FullNameError {
    #[error("Full name must not be empty")]
    Empty,

    #[error("Full name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for AssetUrl validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssetUrlError {
    #[error("Asset URL must not be empty")]
    Empty,

    #[error("Asset URL must be an absolute http(s) URL: {0}")]
    InvalidScheme(String),
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid full name: {0}")]
    InvalidFullName(#[from] FullNameError),

    #[error("Invalid asset URL: {0}")]
    InvalidAssetUrl(#[from] AssetUrlError),

    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    // Domain-level errors
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Video not found: {0}")]
    VideoNotFound(String),

    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    TokenInvalid,

    #[error("Refresh token has been revoked or already used")]
    RefreshTokenRevoked,

    // Infrastructure errors
    #[error("Credential processing failed: {0}")]
    Crypto(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<auth::PasswordError> for UserError {
    fn from(err: auth::PasswordError) -> Self {
        match err {
            auth::PasswordError::EmptyPassword => UserError::InvalidPassword(err.to_string()),
            _ => UserError::Crypto(err.to_string()),
        }
    }
}

impl From<auth::JwtError> for UserError {
    fn from(err: auth::JwtError) -> Self {
        match err {
            auth::JwtError::TokenExpired => UserError::TokenExpired,
            auth::JwtError::TokenInvalid(_) => UserError::TokenInvalid,
            auth::JwtError::EncodingFailed(e) => UserError::Crypto(e),
        }
    }
}
