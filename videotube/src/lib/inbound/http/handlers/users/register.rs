use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::domain::user::models::AssetUrl;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::FullName;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Username;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::UserData;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .user_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    username: String,
    email: String,
    fullname: String,
    avatar: String,
    cover_image: Option<String>,
    password: String,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterUserCommand, UserError> {
        let cover_image = self
            .cover_image
            .filter(|url| !url.trim().is_empty())
            .map(AssetUrl::new)
            .transpose()?;

        Ok(RegisterUserCommand {
            username: Username::new(self.username)?,
            email: EmailAddress::new(self.email)?,
            fullname: FullName::new(self.fullname)?,
            avatar: AssetUrl::new(self.avatar)?,
            cover_image,
            password: self.password,
        })
    }
}
