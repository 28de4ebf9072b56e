use std::sync::Arc;

use auth::Authenticator;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use videotube::config::Config;
use videotube::domain::user::service::UserService;
use videotube::domain::video::service::VideoService;
use videotube::inbound::http::cookies::CookieSettings;
use videotube::inbound::http::router::create_router;
use videotube::inbound::http::router::AppState;
use videotube::inbound::http::router::RouterConfig;
use videotube::outbound::repositories::PostgresUserRepository;
use videotube::outbound::repositories::PostgresVideoRepository;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "videotube=debug,auth=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "videotube",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        cors_origin = %config.server.cors_origin,
        access_token_ttl_seconds = config.auth.access_token.ttl_seconds,
        refresh_token_ttl_seconds = config.auth.refresh_token.ttl_seconds,
        "Configuration loaded"
    );

    // Rejects unusable secrets, ttls and hashing parameters before anything
    // touches the network.
    let authenticator = Arc::new(Authenticator::new(&config.auth)?);

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let video_repository = Arc::new(PostgresVideoRepository::new(pg_pool));

    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_repository),
        Arc::clone(&authenticator),
    ));
    let video_service = Arc::new(VideoService::new(video_repository, user_repository));

    let state = AppState {
        user_service,
        video_service,
        cookies: CookieSettings {
            secure: config.server.secure_cookies,
        },
    };
    let router_config = RouterConfig::try_from(&config.server)?;

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(state, router_config)).await?;
    tracing::info!("Server exited successfully");

    Ok(())
}
