//! Lifelink blood donation coordination service
//!
//! Main application entry point

use std::net::SocketAddr;

use tracing::info;

use lifelink::{
    config::Settings,
    database::{connection, DatabaseService},
    http::{create_router, AppState},
    services::ServiceFactory,
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging
    logging::init_logging(&settings.logging)?;

    info!("Starting {}...", lifelink::info());

    // Initialize database connection
    info!("Connecting to database...");
    let db_config = connection::DatabaseConfig::from_settings(&settings.database);
    let pool = connection::create_pool(&db_config).await?;

    // Run database migrations
    connection::run_migrations(&pool).await?;

    // Seed the configured admin account when missing
    let db = DatabaseService::new(pool.clone());
    let services = ServiceFactory::new(db, settings.clone());
    if let Some(admin) = services.auth_service.bootstrap_admin().await? {
        info!(admin_id = admin.id, "Bootstrapped seed admin account");
    }

    // Build application state and router
    let state = AppState::new(pool, settings.clone());
    let app = create_router(state);

    // Determine bind address
    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    info!("Server listening on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    info!("Lifelink has shut down.");

    Ok(())
}
