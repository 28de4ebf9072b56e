use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::user::models::AssetUrl;
use crate::domain::user::models::UserId;
use crate::domain::video::errors::VideoDurationError;
use crate::domain::video::errors::VideoError;
use crate::domain::video::errors::VideoIdError;
use crate::domain::video::errors::VideoTitleError;

/// Uploaded video metadata.
///
/// The media itself lives in an external store; only its URLs are kept.
#[derive(Debug, Clone)]
pub struct Video {
    pub id: VideoId,
    pub video_file: AssetUrl,
    pub thumbnail: AssetUrl,
    pub title: VideoTitle,
    pub description: String,
    pub views: u64,
    pub is_published: bool,
    pub duration: VideoDuration,
    pub owner: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Video {
    /// Whether `viewer` may see this video.
    ///
    /// Published videos are public; unpublished ones only to their owner.
    pub fn is_visible_to(&self, viewer: Option<&UserId>) -> bool {
        self.is_published || viewer == Some(&self.owner)
    }
}

/// Video unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VideoId(pub Uuid);

impl VideoId {
    /// Generate a new random video ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a video ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, VideoIdError> {
        Uuid::parse_str(s)
            .map(VideoId)
            .map_err(|e| VideoIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for VideoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Video title value object (1-200 characters after trimming).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoTitle(String);

impl VideoTitle {
    const MAX_LENGTH: usize = 200;

    pub fn new(title: String) -> Result<Self, VideoTitleError> {
        let title = title.trim().to_string();
        let length = title.chars().count();

        if length == 0 {
            Err(VideoTitleError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(VideoTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(title))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Running time in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoDuration(f64);

impl VideoDuration {
    /// # Errors
    /// * `NotPositive` - Zero, negative, NaN or infinite
    pub fn from_secs(seconds: f64) -> Result<Self, VideoDurationError> {
        if seconds.is_finite() && seconds > 0.0 {
            Ok(Self(seconds))
        } else {
            Err(VideoDurationError::NotPositive(seconds))
        }
    }

    pub fn as_secs(&self) -> f64 {
        self.0
    }
}

/// Command to publish a new video with validated fields.
#[derive(Debug)]
pub struct CreateVideoCommand {
    pub video_file: AssetUrl,
    pub thumbnail: AssetUrl,
    pub title: VideoTitle,
    pub description: String,
    pub duration: VideoDuration,
    pub is_published: bool,
}

impl CreateVideoCommand {
    /// Build the command, rejecting a blank description.
    ///
    /// # Errors
    /// * `EmptyDescription` - Description is blank
    pub fn new(
        video_file: AssetUrl,
        thumbnail: AssetUrl,
        title: VideoTitle,
        description: String,
        duration: VideoDuration,
        is_published: bool,
    ) -> Result<Self, VideoError> {
        let description = description.trim().to_string();
        if description.is_empty() {
            return Err(VideoError::EmptyDescription);
        }

        Ok(Self {
            video_file,
            thumbnail,
            title,
            description,
            duration,
            is_published,
        })
    }
}
