use std::sync::Arc;

use api_service::config::Config;
use api_service::domain::gw2::service::Gw2Service;
use api_service::domain::session::service::SessionService;
use api_service::domain::user::service::UserService;
use api_service::inbound::http::router::create_router;
use api_service::inbound::http::router::AppState;
use api_service::outbound::gw2::ReqwestGw2Client;
use api_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "api-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;
    let allowed_origins = config.cors.origins()?;

    tracing::info!(
        environment = %config.environment,
        http_port = config.server.http_port,
        jwt_algorithm = %config.jwt.algorithm,
        password_scheme = %config.password.scheme,
        gw2_base_url = %config.gw2.base_url,
        allowed_origins = ?allowed_origins,
        "Configuration loaded"
    );

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

    let authenticator = Arc::new(config.authenticator()?);
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));
    let gw2_client = Arc::new(ReqwestGw2Client::new(
        &config.gw2.base_url,
        config.gw2.timeout(),
    )?);

    let state = AppState {
        user_service: Arc::new(UserService::new(
            Arc::clone(&user_repository),
            Arc::clone(&authenticator),
        )),
        session_service: Arc::new(SessionService::new(
            Arc::clone(&user_repository),
            Arc::clone(&authenticator),
        )),
        gw2_service: Arc::new(Gw2Service::new(gw2_client)),
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(state, &allowed_origins))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
