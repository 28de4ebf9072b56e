use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::header;
use axum::http::HeaderValue;
use axum::http::Method;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::cookies::CookieSettings;
use super::handlers::users;
use super::handlers::videos;
use super::middleware::optional_auth;
use super::middleware::require_auth;
use crate::config::ServerConfig;
use crate::domain::user::ports::UserServicePort;
use crate::domain::video::ports::VideoServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub video_service: Arc<dyn VideoServicePort>,
    pub cookies: CookieSettings,
}

/// Transport settings of the HTTP surface.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    pub cors_origin: HeaderValue,
    pub body_limit_bytes: usize,
    pub static_dir: String,
}

impl TryFrom<&ServerConfig> for RouterConfig {
    type Error = axum::http::header::InvalidHeaderValue;

    fn try_from(server: &ServerConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            cors_origin: HeaderValue::from_str(&server.cors_origin)?,
            body_limit_bytes: server.body_limit_bytes,
            static_dir: server.static_dir.clone(),
        })
    }
}

pub fn create_router(state: AppState, config: RouterConfig) -> Router {
    let public_routes = Router::new()
        .route("/api/v1/users/register", post(users::register))
        .route("/api/v1/users/login", post(users::login))
        .route("/api/v1/users/refresh-token", post(users::refresh_token));

    let protected_routes = Router::new()
        .route("/api/v1/users/logout", post(users::logout))
        .route("/api/v1/users/change-password", post(users::change_password))
        .route("/api/v1/users/current-user", get(users::current_user))
        .route("/api/v1/users/:user_id", get(users::get_user))
        .route("/api/v1/videos", post(videos::publish_video))
        .route("/api/v1/videos/:video_id", delete(videos::delete_video))
        .route(
            "/api/v1/videos/:video_id/toggle-publish",
            patch(videos::toggle_publish),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let viewer_routes = Router::new()
        .route("/api/v1/videos/:video_id", get(videos::get_video))
        .route("/api/v1/videos/:video_id/views", post(videos::record_view))
        .route(
            "/api/v1/videos/owner/:user_id",
            get(videos::list_owner_videos),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), optional_auth));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            // Headers carry bearer tokens and cookies; keep them out of the span.
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    let cors_layer = CorsLayer::new()
        .allow_origin(config.cors_origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(viewer_routes)
        .fallback_service(ServeDir::new(config.static_dir))
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(trace_layer)
        .layer(cors_layer)
        .with_state(state)
}
