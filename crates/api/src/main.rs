use anyhow::Result;
use std::net::SocketAddr;
use tracing::info;

use api::{app, config, middleware};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::load()?;

    // Initialize logging
    middleware::logging::init_logging(&config.logging);

    info!(
        environment = %config.environment,
        "Starting Campaign Reports API v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Create database pool
    let pool = persistence::db::create_pool(&config.pool_config()).await?;

    // Run migrations
    info!("Running database migrations...");
    persistence::db::run_migrations(&pool).await?;
    info!("Migrations completed");

    // Start server
    let addr = config.socket_addr()?;
    let app = app::create_app(config, pool)?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    // Connect info is required by the per-IP rate limiter
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
