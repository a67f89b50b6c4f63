// API server binary entry point
//
// Usage: cargo run --release --bin api_server

use breeding_assistant::{create_router, AppState, ServerConfig};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "breeding_assistant=info,tower_http=debug,axum=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting breeding assistant server...");

    let config = ServerConfig::from_env();

    tracing::info!("Configuration:");
    tracing::info!("  PORT: {}", config.port);
    match &config.data_file {
        Some(path) => tracing::info!("  DATA_FILE: {:?}", path),
        None => tracing::info!("  DATA_FILE: built-in reference table"),
    }
    tracing::info!("  CACHE_TTL: {}s", config.cache_ttl.as_secs());
    tracing::info!("  CHATBOT: {} ({})", config.chatbot.backend().label(), config.chatbot.model);

    tracing::info!("Initializing application state...");
    let state = AppState::new(&config).await?;
    tracing::info!("Application state initialized successfully");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
