use std::sync::Arc;

use auth::Authenticator;
use house_hunter::config::Config;
use house_hunter::domain::account::service::AuthService;
use house_hunter::inbound::http::router::create_router;
use house_hunter::outbound::repositories::PostgresCredentialStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "house_hunter=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "house-hunter",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load().map_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
        e
    })?;

    tracing::info!(
        http_port = config.server.http_port,
        max_connections = config.database.max_connections,
        token_ttl_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    // Refuse to serve at all when the store is unreachable.
    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.connect_timeout())
        .connect(&config.database.url)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to connect to database");
            e
        })?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        config.jwt.token_ttl(),
    ));
    let credential_store = Arc::new(PostgresCredentialStore::new(pg_pool.clone()));
    let auth_service = Arc::new(AuthService::new(
        credential_store,
        Arc::clone(&authenticator),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, authenticator);

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pg_pool.close().await;
    tracing::info!(database = "postgresql", "Database connection pool closed");

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await
        }
    }
}
