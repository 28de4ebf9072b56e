use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::parse_video_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn delete_video(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(video_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let video_id = parse_video_id(&video_id)?;

    state
        .video_service
        .delete_video(&video_id, &user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}
