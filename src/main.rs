//! # Conversation Server
//!
//! A multi-tenant conversation backend.
//!
//! This is the application entry point that initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - Database connection pool
//! - Broadcast exchange (Redis pub/sub)
//! - HTTP/WebSocket server

use anyhow::Result;
use tracing::info;

use conversation_server::config::Settings;
use conversation_server::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for structured logging
    conversation_server::telemetry::init_tracing();

    info!("Starting Conversation Server...");

    // Load configuration from environment and config files
    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        "Configuration loaded"
    );

    // Build and run the application
    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
