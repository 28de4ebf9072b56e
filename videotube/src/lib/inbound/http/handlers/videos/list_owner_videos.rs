use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::VideoData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Owners see their drafts; everyone else only published videos.
pub async fn list_owner_videos(
    State(state): State<AppState>,
    viewer: Option<Extension<AuthenticatedUser>>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<Vec<VideoData>>, ApiError> {
    let owner = UserId::from_string(&user_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let viewer = viewer.map(|Extension(user)| user.user_id);

    state
        .video_service
        .list_videos_by_owner(&owner, viewer.as_ref())
        .await
        .map_err(ApiError::from)
        .map(|videos| ApiSuccess::new(StatusCode::OK, videos.iter().map(VideoData::from).collect()))
}
