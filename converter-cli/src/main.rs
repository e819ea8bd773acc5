//! Converter CLI
//!
//! Command-line interface for the currency converter. Runs conversions
//! in-process against the remote provider or the offline seed table, and
//! drives a running converter server through the client SDK.

use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use converter_client::ConverterClient;
use converter_hex::outbound::{DEFAULT_API_URL, Source, SourceConfig, build_source};
use converter_hex::{ConverterService, ConverterSettings};
use converter_types::{Conversion, CurrencyCode, DisplayState};

#[derive(Parser)]
#[command(name = "fx")]
#[command(author, version, about = "Currency converter CLI", long_about = None)]
struct Cli {
    #[command(flatten)]
    rates: RateArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Where rates come from for in-process commands.
#[derive(Args)]
struct RateArgs {
    /// Use the built-in offline rate table instead of the remote provider
    #[arg(long, global = true)]
    offline: bool,

    /// API key for the remote rate provider
    #[arg(long, global = true, env = "EXCHANGE_RATE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Base URL of the remote rate provider
    #[arg(long, global = true, env = "EXCHANGE_RATE_API_URL", default_value = DEFAULT_API_URL)]
    provider_url: String,

    /// Request timeout for the remote provider, in seconds
    #[arg(long, global = true, env = "FETCH_TIMEOUT_SECS", default_value = "10")]
    timeout_secs: u64,

    /// Base currency rates are expressed against
    #[arg(long, global = true, env = "BASE_CURRENCY", default_value = "USD")]
    base: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an amount between two currencies
    Convert {
        /// Amount to convert
        amount: String,
        /// Source currency
        #[arg(long, default_value = "USD")]
        from: String,
        /// Target currency
        #[arg(long, default_value = "INR")]
        to: String,
    },
    /// List the available rates
    Rates,
    /// Convert an amount into the popular currencies
    Popular {
        /// Amount to convert
        #[arg(default_value = "1")]
        amount: String,
        /// Source currency
        #[arg(long, default_value = "USD")]
        from: String,
    },
    /// Drive a running converter server
    Remote {
        /// Base URL of the Converter API
        #[arg(
            long,
            env = "CONVERTER_API_URL",
            default_value = "http://localhost:3000"
        )]
        api_url: String,

        #[command(subcommand)]
        action: RemoteCommands,
    },
}

#[derive(Subcommand)]
enum RemoteCommands {
    /// Show the current display state
    State,
    /// Refresh rates on the server
    Refresh,
    /// Set the amount
    Amount { value: String },
    /// Select the source currency
    From { currency: String },
    /// Select the target currency
    To { currency: String },
    /// List the server's rates
    Rates,
    /// Show the popular conversions grid
    Popular,
    /// Check API health
    Health,
}

impl RateArgs {
    fn source_config(&self) -> Result<SourceConfig> {
        if self.offline {
            return Ok(SourceConfig::Offline);
        }
        let api_key = self.api_key.clone().ok_or_else(|| {
            anyhow::anyhow!("No API key: set EXCHANGE_RATE_API_KEY or pass --offline")
        })?;
        Ok(SourceConfig::Remote {
            api_url: self.provider_url.clone(),
            api_key,
            timeout: (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs)),
        })
    }

    /// Builds a service and loads rates once.
    async fn loaded_service(&self) -> Result<ConverterService<Source>> {
        let base = parse_currency(&self.base)?;
        let settings = ConverterSettings::new(base.clone(), base);
        let service = ConverterService::new(build_source(self.source_config()?), settings);
        service
            .request_rate_refresh()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to fetch conversion data: {}", e))?;
        Ok(service)
    }
}

fn parse_currency(s: &str) -> Result<CurrencyCode> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Invalid currency code: {}", s))
}

fn print_display(state: &DisplayState) {
    if let Some(error) = &state.error {
        eprintln!("✗ {}", error);
    }
    if state.loading {
        println!("… loading rates");
    }
    println!(
        "{} {} = {} {}",
        state.amount, state.from_currency, state.converted_amount, state.to_currency
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert { amount, from, to } => {
            let service = cli.rates.loaded_service().await?;
            service.set_amount(&amount)?;
            service.set_from_currency(&from)?;
            let state = service.set_to_currency(&to)?;
            print_display(&state);
            if state.converted_amount == Conversion::Unavailable {
                std::process::exit(1);
            }
        }

        Commands::Rates => {
            let service = cli.rates.loaded_service().await?;
            let rates = service.rates()?;
            println!("Base: {}", rates.base);
            if let Some(updated_at) = rates.updated_at {
                println!("Updated: {}", updated_at.to_rfc3339());
            }
            for (code, rate) in &rates.rates {
                println!("{:<4} {}", code, rate);
            }
        }

        Commands::Popular { amount, from } => {
            let service = cli.rates.loaded_service().await?;
            service.set_amount(&amount)?;
            let state = service.set_from_currency(&from)?;
            println!("{} {}", state.amount, state.from_currency);
            for entry in service.popular_conversions(exchange_rates::POPULAR_CURRENCIES) {
                println!(
                    "  {:<4} {} {}",
                    entry.currency, entry.symbol, entry.converted_amount
                );
            }
        }

        Commands::Remote { api_url, action } => {
            let client = ConverterClient::new(&api_url);
            match action {
                RemoteCommands::Health => {
                    let healthy = client.health().await?;
                    if healthy {
                        println!("✓ API is healthy");
                    } else {
                        println!("✗ API is not healthy");
                        std::process::exit(1);
                    }
                }
                RemoteCommands::State => print_display(&client.state().await?),
                RemoteCommands::Refresh => print_display(&client.refresh().await?),
                RemoteCommands::Amount { value } => {
                    print_display(&client.set_amount(&value).await?)
                }
                RemoteCommands::From { currency } => {
                    print_display(&client.set_from_currency(&currency).await?)
                }
                RemoteCommands::To { currency } => {
                    print_display(&client.set_to_currency(&currency).await?)
                }
                RemoteCommands::Rates => {
                    let rates = client.rates().await?;
                    println!("{}", serde_json::to_string_pretty(&rates)?);
                }
                RemoteCommands::Popular => {
                    let popular = client.popular().await?;
                    println!("{}", serde_json::to_string_pretty(&popular)?);
                }
            }
        }
    }

    Ok(())
}
