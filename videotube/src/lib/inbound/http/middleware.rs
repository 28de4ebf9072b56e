use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;

use super::cookies::ACCESS_TOKEN_COOKIE;
use super::handlers::ApiError;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Extension type to store authenticated user ID in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
}

/// Middleware that requires a valid access token and adds user info to
/// request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(&req)
        .ok_or_else(|| ApiError::Unauthorized("Missing access token".to_string()))?;

    let user = resolve_user(&state, &token).await.map_err(|e| {
        tracing::warn!("Access token rejected: {}", e);
        ApiError::from(e)
    })?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Middleware that identifies the caller when a valid access token is
/// present. Requests without one, or with one that fails verification,
/// continue anonymously.
pub async fn optional_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    if let Some(token) = extract_token(&req) {
        match resolve_user(&state, &token).await {
            Ok(user) => {
                req.extensions_mut().insert(user);
            }
            Err(e) => tracing::debug!("Continuing anonymously: {}", e),
        }
    }

    next.run(req).await
}

async fn resolve_user(state: &AppState, token: &str) -> Result<AuthenticatedUser, UserError> {
    let claims = state.user_service.verify_access_token(token)?;

    let user_id = UserId::from_string(&claims.sub).map_err(|_| UserError::TokenInvalid)?;

    // Tokens of deleted accounts stay well-formed until they expire.
    let user = state
        .user_service
        .get_user(&user_id)
        .await
        .map_err(|e| match e {
            UserError::NotFound(_) => UserError::TokenInvalid,
            other => other,
        })?;

    Ok(AuthenticatedUser {
        user_id: user.id,
        username: user.username.as_str().to_string(),
    })
}

/// Bearer token from the Authorization header, falling back to the access
/// token cookie.
fn extract_token(req: &Request) -> Option<String> {
    let from_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string);

    from_header.or_else(|| {
        CookieJar::from_headers(req.headers())
            .get(ACCESS_TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|token| !token.is_empty())
    })
}
