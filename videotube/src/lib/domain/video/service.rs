use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::domain::video::errors::VideoError;
use crate::domain::video::models::CreateVideoCommand;
use crate::domain::video::models::Video;
use crate::domain::video::models::VideoId;
use crate::domain::video::ports::VideoRepository;
use crate::domain::video::ports::VideoServicePort;

/// Domain service implementation for video operations.
pub struct VideoService<VR, UR>
where
    VR: VideoRepository,
    UR: UserRepository,
{
    videos: Arc<VR>,
    users: Arc<UR>,
}

impl<VR, UR> VideoService<VR, UR>
where
    VR: VideoRepository,
    UR: UserRepository,
{
    /// Create a new video service.
    ///
    /// # Arguments
    /// * `videos` - Video persistence implementation
    /// * `users` - User persistence, used to record watch history
    pub fn new(videos: Arc<VR>, users: Arc<UR>) -> Self {
        Self { videos, users }
    }

    async fn find_owned(&self, id: &VideoId, actor: &UserId) -> Result<Video, VideoError> {
        let video = self
            .videos
            .find_by_id(id)
            .await?
            .ok_or(VideoError::NotFound(id.to_string()))?;

        if video.owner != *actor {
            tracing::warn!(video_id = %id, actor = %actor, "Rejected modification by non-owner");
            return Err(VideoError::Forbidden(id.to_string()));
        }

        Ok(video)
    }
}

#[async_trait]
impl<VR, UR> VideoServicePort for VideoService<VR, UR>
where
    VR: VideoRepository,
    UR: UserRepository,
{
    async fn publish_video(
        &self,
        owner: &UserId,
        command: CreateVideoCommand,
    ) -> Result<Video, VideoError> {
        let now = Utc::now();
        let video = Video {
            id: VideoId::new(),
            video_file: command.video_file,
            thumbnail: command.thumbnail,
            title: command.title,
            description: command.description,
            views: 0,
            is_published: command.is_published,
            duration: command.duration,
            owner: *owner,
            created_at: now,
            updated_at: now,
        };

        let created = self.videos.create(video).await?;
        tracing::info!(video_id = %created.id, owner = %owner, "Video published");

        Ok(created)
    }

    async fn get_video(&self, id: &VideoId, viewer: Option<&UserId>) -> Result<Video, VideoError> {
        self.videos
            .find_by_id(id)
            .await?
            .filter(|video| video.is_visible_to(viewer))
            .ok_or(VideoError::NotFound(id.to_string()))
    }

    async fn list_videos_by_owner(
        &self,
        owner: &UserId,
        viewer: Option<&UserId>,
    ) -> Result<Vec<Video>, VideoError> {
        let videos = self.videos.list_by_owner(owner).await?;

        Ok(videos
            .into_iter()
            .filter(|video| video.is_visible_to(viewer))
            .collect())
    }

    async fn toggle_publish(&self, id: &VideoId, actor: &UserId) -> Result<Video, VideoError> {
        let mut video = self.find_owned(id, actor).await?;

        video.is_published = !video.is_published;
        video.updated_at = Utc::now();

        let updated = self.videos.update(video).await?;
        tracing::info!(video_id = %id, is_published = updated.is_published, "Video visibility changed");

        Ok(updated)
    }

    async fn delete_video(&self, id: &VideoId, actor: &UserId) -> Result<(), VideoError> {
        self.find_owned(id, actor).await?;
        self.videos.delete(id).await?;
        tracing::info!(video_id = %id, "Video deleted");
        Ok(())
    }

    async fn record_view(
        &self,
        id: &VideoId,
        viewer: Option<&UserId>,
    ) -> Result<Video, VideoError> {
        let mut video = self.get_video(id, viewer).await?;
        video.views = self.videos.increment_views(id).await?;

        if let Some(viewer) = viewer {
            if let Err(e) = self.users.push_watch_history(viewer, id).await {
                tracing::error!(
                    "Failed to record watch history of video {} for user {}: {}",
                    id,
                    viewer,
                    e
                );
            }
        }

        Ok(video)
    }
}
