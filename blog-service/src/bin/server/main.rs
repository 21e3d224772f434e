use std::sync::Arc;

use anyhow::Context;
use auth::TokenCodec;
use blog_service::config::Config;
use blog_service::domain::auth::service::AuthService;
use blog_service::domain::post::service::PostService;
use blog_service::domain::user::service::UserService;
use blog_service::inbound::http::router::create_router;
use blog_service::outbound::repositories::PostgresPostRepository;
use blog_service::outbound::repositories::PostgresUserRepository;
use chrono::Duration;
use jsonwebtoken::Algorithm;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blog_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "blog-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_algorithm = %config.token.algorithm,
        token_expire_minutes = config.token.expire_minutes,
        "Configuration loaded"
    );

    // Signing configuration is validated here so a bad secret or algorithm
    // kills the process instead of failing on the first login
    let algorithm: Algorithm = config
        .token
        .algorithm
        .parse()
        .ok()
        .with_context(|| format!("Unknown signing algorithm: {}", config.token.algorithm))?;
    let token_codec = TokenCodec::new(
        config.token.secret.as_bytes(),
        algorithm,
        Duration::minutes(config.token.expire_minutes),
    )?;

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let post_repository = Arc::new(PostgresPostRepository::new(pg_pool));

    let user_service = Arc::new(UserService::new(Arc::clone(&user_repository)));
    let post_service = Arc::new(PostService::new(post_repository));
    let auth_service = Arc::new(AuthService::new(user_repository, token_codec));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let application = create_router(user_service, post_service, auth_service);
    axum::serve(http_listener, application).await?;

    Ok(())
}
