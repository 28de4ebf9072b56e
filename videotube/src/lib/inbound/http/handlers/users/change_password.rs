use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::domain::user::models::ChangePasswordCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::MessageData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn change_password(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    jar: CookieJar,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<(CookieJar, ApiSuccess<MessageData>), ApiError> {
    let command = ChangePasswordCommand {
        old_password: body.old_password,
        new_password: body.new_password,
    };

    state
        .user_service
        .change_password(&user.user_id, command)
        .await
        .map_err(ApiError::from)?;

    // The stored refresh token was cleared; drop the stale cookie too.
    let jar = state.cookies.clear_refresh(jar);

    Ok((
        jar,
        ApiSuccess::new(StatusCode::OK, MessageData::new("Password changed")),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChangePasswordRequest {
    old_password: String,
    new_password: String,
}
