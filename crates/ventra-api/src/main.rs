//! Ventra API server entry point.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use ventra_api::auth::AuthConfig;
use ventra_api::state::AppState;
use ventra_core::clock::SystemClock;
use ventra_inventory::{HttpInventoryClient, InventoryConfig};
use ventra_reports::HtmlReportRenderer;
use ventra_store::PgSaleRepository;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Ventra API server");

    // Read configuration from environment.
    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| "DATABASE_URL environment variable must be set")?;
    let jwt_secret =
        std::env::var("JWT_SECRET").map_err(|_| "JWT_SECRET environment variable must be set")?;
    let inventory_base_url = std::env::var("INVENTORY_BASE_URL")
        .map_err(|_| "INVENTORY_BASE_URL environment variable must be set")?;
    let inventory_secret = std::env::var("INVENTORY_SHARED_SECRET").ok();
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .map_err(|e| format!("PORT must be a valid u16: {e}"))?;

    // Create database connection pool and ensure the schema exists.
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await?;
    let sales = PgSaleRepository::new(pool);
    sales.ensure_schema().await?;

    // Build application state.
    let inventory_config = InventoryConfig::new(inventory_base_url, inventory_secret);
    let inventory = HttpInventoryClient::new(inventory_config)?;
    let app_state = AppState::new(
        Arc::new(sales),
        Arc::new(inventory),
        Arc::new(HtmlReportRenderer),
        Arc::new(SystemClock),
        AuthConfig::from_secret(&jwt_secret),
    );

    // Build router.
    let app = ventra_api::app(app_state);

    // Start server.
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| format!("invalid HOST:PORT combination: {e}"))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
