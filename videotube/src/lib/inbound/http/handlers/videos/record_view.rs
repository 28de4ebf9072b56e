use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::parse_video_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::VideoData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn record_view(
    State(state): State<AppState>,
    viewer: Option<Extension<AuthenticatedUser>>,
    Path(video_id): Path<String>,
) -> Result<ApiSuccess<VideoData>, ApiError> {
    let video_id = parse_video_id(&video_id)?;
    let viewer = viewer.map(|Extension(user)| user.user_id);

    state
        .video_service
        .record_view(&video_id, viewer.as_ref())
        .await
        .map_err(ApiError::from)
        .map(|ref video| ApiSuccess::new(StatusCode::OK, video.into()))
}
