use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::SessionData;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginIdentifier;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, ApiSuccess<SessionData>), ApiError> {
    let session = state
        .user_service
        .login(body.try_into_command()?)
        .await
        .map_err(ApiError::from)?;

    let jar = state.cookies.set_session(jar, &session.tokens);

    Ok((jar, ApiSuccess::new(StatusCode::OK, (&session).into())))
}

/// Either `username` or `email` identifies the account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    username: Option<String>,
    email: Option<String>,
    password: String,
}

impl LoginRequest {
    fn try_into_command(self) -> Result<LoginCommand, ApiError> {
        let raw = self
            .email
            .or(self.username)
            .filter(|identifier| !identifier.trim().is_empty())
            .ok_or_else(|| ApiError::BadRequest("Username or email is required".to_string()))?;

        // A malformed identifier cannot belong to any account.
        let identifier =
            LoginIdentifier::parse(raw).ok_or_else(|| ApiError::from(UserError::InvalidCredentials))?;

        Ok(LoginCommand {
            identifier,
            password: self.password,
        })
    }
}
