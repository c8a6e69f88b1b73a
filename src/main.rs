use anyhow::{Context, Result};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use showroom_rust::{config::Settings, routes, AppState, Catalog};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file first. Ignore errors (e.g., file not found)
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "showroom_rust=info,tower_http=info".into()),
        ) // Default to info if RUST_LOG not set
        .with(fmt::layer())
        .init();

    tracing::info!("Initializing showroom server...");

    // Load configuration
    let settings = match Settings::new() {
        Ok(s) => {
            tracing::info!("Configuration loaded successfully.");
            s
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e); // Propagate the error
        }
    };

    // The inventory is validated once here and shared read-only afterwards
    let catalog = Catalog::load(&settings.catalog_path)
        .with_context(|| format!("Failed to load catalog from {}", settings.catalog_path))?;
    tracing::info!("Catalog ready with {} vehicles.", catalog.len());

    // Parse the server address from settings
    let addr: SocketAddr = settings
        .server_address
        .parse()
        .with_context(|| format!("Invalid server address format: {}", settings.server_address))?;

    let app_state = AppState::new(settings, catalog);
    let app = routes::create_router(app_state);

    // Create a TCP listener
    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => {
            tracing::info!("Server listening on {}", addr);
            l
        }
        Err(e) => {
            tracing::error!("Failed to bind to address {}: {}", addr, e);
            return Err(e.into()); // Convert std::io::Error to anyhow::Error
        }
    };

    // Run the server
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
