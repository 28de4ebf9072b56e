use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum_extra::extract::cookie::CookieJar;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::MessageData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    jar: CookieJar,
) -> Result<(CookieJar, ApiSuccess<MessageData>), ApiError> {
    state
        .user_service
        .logout(&user.user_id)
        .await
        .map_err(ApiError::from)?;

    let jar = state.cookies.clear_session(jar);

    Ok((
        jar,
        ApiSuccess::new(StatusCode::OK, MessageData::new("Logged out")),
    ))
}
