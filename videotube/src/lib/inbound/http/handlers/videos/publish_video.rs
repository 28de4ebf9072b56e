use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use crate::domain::user::models::AssetUrl;
use crate::domain::video::errors::VideoError;
use crate::domain::video::models::CreateVideoCommand;
use crate::domain::video::models::VideoDuration;
use crate::domain::video::models::VideoTitle;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::VideoData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn publish_video(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<PublishVideoRequest>,
) -> Result<ApiSuccess<VideoData>, ApiError> {
    state
        .video_service
        .publish_video(&user.user_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref video| ApiSuccess::new(StatusCode::CREATED, video.into()))
}

/// HTTP request body for publishing a video (raw JSON)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PublishVideoRequest {
    video_file: String,
    thumbnail: String,
    title: String,
    description: String,
    duration: f64,
    #[serde(default = "published_by_default")]
    is_published: bool,
}

fn published_by_default() -> bool {
    true
}

impl PublishVideoRequest {
    fn try_into_command(self) -> Result<CreateVideoCommand, VideoError> {
        CreateVideoCommand::new(
            AssetUrl::new(self.video_file)?,
            AssetUrl::new(self.thumbnail)?,
            VideoTitle::new(self.title)?,
            self.description,
            VideoDuration::from_secs(self.duration)?,
            self.is_published,
        )
    }
}
