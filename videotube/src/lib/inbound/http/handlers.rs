use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::user::models::User;
use crate::domain::video::errors::VideoError;
use crate::domain::video::models::Video;
use crate::user::errors::UserError;

pub mod users;
pub mod videos;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) | UserError::VideoNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            UserError::UsernameAlreadyExists(_) | UserError::EmailAlreadyExists(_) => {
                ApiError::Conflict(err.to_string())
            }
            UserError::InvalidCredentials
            | UserError::TokenExpired
            | UserError::TokenInvalid
            | UserError::RefreshTokenRevoked => ApiError::Unauthorized(err.to_string()),
            UserError::InvalidUsername(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidUserId(_)
            | UserError::InvalidFullName(_)
            | UserError::InvalidAssetUrl(_)
            | UserError::InvalidPassword(_) => ApiError::UnprocessableEntity(err.to_string()),
            UserError::Crypto(msg) => {
                // Details stay in the log; clients only learn that it failed.
                tracing::error!("Credential processing failed: {}", msg);
                ApiError::InternalServerError("Credential processing failed".to_string())
            }
            UserError::DatabaseError(_) | UserError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<VideoError> for ApiError {
    fn from(err: VideoError) -> Self {
        match err {
            VideoError::NotFound(_) => ApiError::NotFound(err.to_string()),
            VideoError::Forbidden(_) => ApiError::Forbidden(err.to_string()),
            VideoError::InvalidVideoId(_)
            | VideoError::InvalidOwnerId(_)
            | VideoError::InvalidTitle(_)
            | VideoError::InvalidDuration(_)
            | VideoError::InvalidAssetUrl(_)
            | VideoError::EmptyDescription => ApiError::UnprocessableEntity(err.to_string()),
            VideoError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Acknowledgement for operations without a resource to return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageData {
    pub message: String,
}

impl MessageData {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Account view for the account holder. Never carries credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub fullname: String,
    pub avatar: String,
    pub cover_image: Option<String>,
    pub watch_history: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            fullname: user.fullname.as_str().to_string(),
            avatar: user.avatar.as_str().to_string(),
            cover_image: user.cover_image.as_ref().map(|c| c.as_str().to_string()),
            watch_history: user.watch_history.iter().map(|v| v.to_string()).collect(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Channel profile visible to other users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicUserData {
    pub id: String,
    pub username: String,
    pub fullname: String,
    pub avatar: String,
    pub cover_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for PublicUserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.as_str().to_string(),
            fullname: user.fullname.as_str().to_string(),
            avatar: user.avatar.as_str().to_string(),
            cover_image: user.cover_image.as_ref().map(|c| c.as_str().to_string()),
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoData {
    pub id: String,
    pub video_file: String,
    pub thumbnail: String,
    pub title: String,
    pub description: String,
    pub views: u64,
    pub is_published: bool,
    pub duration: f64,
    pub owner: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Video> for VideoData {
    fn from(video: &Video) -> Self {
        Self {
            id: video.id.to_string(),
            video_file: video.video_file.as_str().to_string(),
            thumbnail: video.thumbnail.as_str().to_string(),
            title: video.title.as_str().to_string(),
            description: video.description.clone(),
            views: video.views,
            is_published: video.is_published,
            duration: video.duration.as_secs(),
            owner: video.owner.to_string(),
            created_at: video.created_at,
            updated_at: video.updated_at,
        }
    }
}
