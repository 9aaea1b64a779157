use std::sync::Arc;

use auth::Authenticator;
use blog_service::config::Config;
use blog_service::domain::article::service::ArticleService;
use blog_service::domain::user::service::UserService;
use blog_service::inbound::http::router::create_router;
use blog_service::outbound::repositories::PostgresArticleRepository;
use blog_service::outbound::repositories::PostgresUserRepository;
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
        api_prefix = %config.server.api_prefix,
        jwt_algorithm = %config.jwt.algorithm,
        access_token_expire_minutes = config.jwt.access_token_expire_minutes,
        "Configuration loaded"
    );

    // Rejects bad algorithms, empty secrets and invalid hashing costs before
    // anything is served.
    let authenticator = Arc::new(Authenticator::new(&config.auth_settings())?);

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
    let article_repository = Arc::new(PostgresArticleRepository::new(pg_pool));

    let user_service = Arc::new(UserService::new(
        user_repository,
        Arc::clone(&authenticator),
    ));
    let article_service = Arc::new(ArticleService::new(article_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        user_service,
        article_service,
        authenticator,
        &config.server.api_prefix,
    );

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}
