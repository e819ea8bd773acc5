//! Client example demonstrating a full conversion session against a running server.
//!
//! Run with: cargo run -p converter-app --example client_example

use converter_client::ConverterClient;
use converter_hex::outbound::{SourceConfig, build_source};
use converter_hex::{ConverterService, ConverterSettings, inbound::HttpServer};
use converter_types::CurrencyCode;
use std::net::SocketAddr;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Bind an ephemeral port up front so the client can't race the server
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;

    println!("🚀 Starting offline converter on {addr}...");

    let settings = ConverterSettings::new(CurrencyCode::new("USD")?, CurrencyCode::new("INR")?);
    let service = ConverterService::new(build_source(SourceConfig::Offline), settings);
    let router = HttpServer::new(service).router();

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            tracing::error!(error = %e, "Example server stopped");
        }
    });

    let client = ConverterClient::new(format!("http://{addr}"));

    // ─────────────────────────────────────────────────────────────────────────
    // Demo: Conversion session
    // ─────────────────────────────────────────────────────────────────────────

    let health = client.health().await?;
    println!("✅ Server health: {health}");

    // Inputs are locked until rates load
    let response = client.set_amount("10").await;
    println!("✅ Locked before first load: {}", response.unwrap_err());

    let state = client.refresh().await?;
    println!(
        "✅ Rates loaded: {} currencies, {} {} = {} {}",
        state.currencies.len(),
        state.amount,
        state.from_currency,
        state.converted_amount,
        state.to_currency
    );

    let state = client.set_amount("0025").await?;
    println!(
        "✅ Amount normalized to {}: {} {}",
        state.amount, state.converted_amount, state.to_currency
    );

    client.set_from_currency("INR").await?;
    let state = client.set_to_currency("EUR").await?;
    println!(
        "✅ Cross conversion: {} {} = {} {}",
        state.amount, state.from_currency, state.converted_amount, state.to_currency
    );

    let state = client.set_to_currency("ZZZ").await?;
    println!("✅ Unknown currency: {}", state.converted_amount);

    println!("\n📋 Popular conversions from {}:", state.from_currency);
    for entry in client.popular().await? {
        println!(
            "   - {} {} {}",
            entry.currency, entry.symbol, entry.converted_amount
        );
    }

    println!("\n🎉 Example completed successfully!");

    Ok(())
}
