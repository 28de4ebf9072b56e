use async_trait::async_trait;

use crate::domain::user::models::UserId;
use crate::domain::video::errors::VideoError;
use crate::domain::video::models::CreateVideoCommand;
use crate::domain::video::models::Video;
use crate::domain::video::models::VideoId;

/// Port for video domain service operations.
#[async_trait]
pub trait VideoServicePort: Send + Sync + 'static {
    /// Store metadata of a new video owned by `owner`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn publish_video(
        &self,
        owner: &UserId,
        command: CreateVideoCommand,
    ) -> Result<Video, VideoError>;

    /// Retrieve a video visible to `viewer`.
    ///
    /// # Errors
    /// * `NotFound` - Video does not exist or is unpublished and not owned by `viewer`
    /// * `DatabaseError` - Database operation failed
    async fn get_video(&self, id: &VideoId, viewer: Option<&UserId>) -> Result<Video, VideoError>;

    /// List an owner's videos visible to `viewer`, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_videos_by_owner(
        &self,
        owner: &UserId,
        viewer: Option<&UserId>,
    ) -> Result<Vec<Video>, VideoError>;

    /// Flip the published flag of a video.
    ///
    /// # Errors
    /// * `NotFound` - Video does not exist
    /// * `Forbidden` - `actor` does not own the video
    /// * `DatabaseError` - Database operation failed
    async fn toggle_publish(&self, id: &VideoId, actor: &UserId) -> Result<Video, VideoError>;

    /// Remove a video.
    ///
    /// # Errors
    /// * `NotFound` - Video does not exist
    /// * `Forbidden` - `actor` does not own the video
    /// * `DatabaseError` - Database operation failed
    async fn delete_video(&self, id: &VideoId, actor: &UserId) -> Result<(), VideoError>;

    /// Count a view and, for signed-in viewers, append the video to their
    /// watch history.
    ///
    /// # Errors
    /// * `NotFound` - Video does not exist or is not visible to `viewer`
    /// * `DatabaseError` - Database operation failed
    async fn record_view(&self, id: &VideoId, viewer: Option<&UserId>)
        -> Result<Video, VideoError>;
}

/// Persistence operations for videos.
#[async_trait]
pub trait VideoRepository: Send + Sync + 'static {
    /// Persist a new video.
    async fn create(&self, video: Video) -> Result<Video, VideoError>;

    /// Retrieve video by identifier.
    ///
    /// # Returns
    /// Optional video (None if not found)
    async fn find_by_id(&self, id: &VideoId) -> Result<Option<Video>, VideoError>;

    /// All videos of an owner, newest first.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Video>, VideoError>;

    /// Update an existing video.
    ///
    /// # Errors
    /// * `NotFound` - Video does not exist
    async fn update(&self, video: Video) -> Result<Video, VideoError>;

    /// Remove a video.
    ///
    /// # Errors
    /// * `NotFound` - Video does not exist
    async fn delete(&self, id: &VideoId) -> Result<(), VideoError>;

    /// Atomically add one to the view counter.
    ///
    /// # Returns
    /// The new view count
    ///
    /// # Errors
    /// * `NotFound` - Video does not exist
    async fn increment_views(&self, id: &VideoId) -> Result<u64, VideoError>;
}
