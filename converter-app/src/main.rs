//! # Converter Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Build the configured rate source
//! - Create the converter service and start the first rate fetch
//! - Start the HTTP server

mod config;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use converter_hex::outbound::build_source;
use converter_hex::{ConverterService, inbound::HttpServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,converter_app=debug,converter_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    let source = build_source(config.source);
    let service = ConverterService::new(source, config.settings);

    tracing::info!(
        "Starting converter server on port {} (base {}, secondary {})",
        config.port,
        service.settings().base_currency,
        service.settings().secondary_currency
    );

    // Rates load in the background; the API reports `loading` until then
    let server = HttpServer::new(service);
    server.spawn_refresh();

    let addr = format!("0.0.0.0:{}", config.port);
    server.run(&addr).await?;

    Ok(())
}
