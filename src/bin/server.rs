//! RMS HTTP Server Binary
//!
//! This is the main entry point for the Routine Management System REST API
//! server. It loads the configuration, initializes the repository, seeds the
//! standard sections, starts the background expiration sweep, and serves
//! requests until Ctrl-C.
//!
//! # Usage
//!
//! ```bash
//! # Run with local (in-memory) repository (default)
//! cargo run --bin rms-server --features "local-repo,http-server"
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use rms_rust::api::Section;
use rms_rust::config::AppConfig;
use rms_rust::db::{FullRepository, RepositoryFactory};
use rms_rust::http::{create_router, AppState};
use rms_rust::scheduler::SweepScheduler;
use rms_rust::services::notify::LogNotifier;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting RMS HTTP Server");

    // Load configuration; a missing rms.toml falls back to defaults
    let config = match AppConfig::from_default_location() {
        Ok(config) => config,
        Err(e) => {
            warn!("No configuration file loaded ({}), using defaults", e);
            AppConfig::default()
        }
    };

    let repository = RepositoryFactory::from_app_config(&config)
        .await
        .map_err(|e| anyhow::anyhow!(e))?;
    info!("Repository initialized successfully");

    seed_sections(repository.as_ref()).await?;

    // Background expiration sweep, stopped via the shutdown channel
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler = SweepScheduler::new(Arc::clone(&repository), &config.sweep);
    let sweep_task = tokio::spawn(scheduler.run(shutdown_rx));

    // Create application state
    let state = AppState::new(Arc::clone(&repository))
        .with_notifier(Arc::new(LogNotifier), config.notifier.clone());

    // Create router with all endpoints
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);
    info!("API documentation: http://{}/health", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Stop the sweep loop before exiting
    let _ = shutdown_tx.send(true);
    let _ = sweep_task.await;

    info!("Server stopped");
    Ok(())
}

/// Ensure the standard sections exist before the first request.
///
/// Every semester is split into sections A and B, so the store is seeded
/// with both on startup when empty.
async fn seed_sections(repository: &dyn FullRepository) -> anyhow::Result<()> {
    let existing = repository
        .list_sections()
        .await
        .map_err(|e| anyhow::anyhow!(e))?;
    if !existing.is_empty() {
        return Ok(());
    }

    for name in ["A", "B"] {
        repository
            .store_section(Section {
                section_name: name.to_string(),
            })
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
    }
    info!("Seeded sections A and B");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}
