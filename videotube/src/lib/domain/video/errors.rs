use thiserror::Error;

use crate::domain::user::errors::AssetUrlError;
use crate::domain::user::errors::UserIdError;

/// Error for VideoId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VideoIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for VideoTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VideoTitleError {
    #[error("Title must not be empty")]
    Empty,

    #[error("Title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for VideoDuration validation failures
#[derive(Debug, Clone, Error, PartialEq)]
pub enum VideoDurationError {
    #[error("Duration must be a positive number of seconds, got {0}")]
    NotPositive(f64),
}

/// Top-level error for all video-related operations
#[derive(Debug, Clone, Error)]
pub enum VideoError {
    #[error("Invalid video ID: {0}")]
    InvalidVideoId(#[from] VideoIdError),

    #[error("Invalid owner ID: {0}")]
    InvalidOwnerId(#[from] UserIdError),

    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] VideoTitleError),

    #[error("Invalid duration: {0}")]
    InvalidDuration(#[from] VideoDurationError),

    #[error("Invalid asset URL: {0}")]
    InvalidAssetUrl(#[from] AssetUrlError),

    #[error("Description must not be empty")]
    EmptyDescription,

    #[error("Video not found: {0}")]
    NotFound(String),

    #[error("Only the owner may modify video {0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
