use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::SessionData;
use crate::inbound::http::cookies::REFRESH_TOKEN_COOKIE;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Rotates the session. The refresh token is read from its cookie, or from
/// the JSON body for clients that do not keep cookies.
pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Option<Json<RefreshTokenRequest>>,
) -> Result<(CookieJar, ApiSuccess<SessionData>), ApiError> {
    let token = jar
        .get(REFRESH_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
        .or_else(|| body.and_then(|Json(body)| body.refresh_token))
        .ok_or_else(|| ApiError::Unauthorized("Missing refresh token".to_string()))?;

    let session = state
        .user_service
        .refresh_session(&token)
        .await
        .map_err(ApiError::from)?;

    let jar = state.cookies.set_session(jar, &session.tokens);

    Ok((jar, ApiSuccess::new(StatusCode::OK, (&session).into())))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshTokenRequest {
    refresh_token: Option<String>,
}
