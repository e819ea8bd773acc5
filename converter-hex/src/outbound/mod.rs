//! Outbound rate source adapters.
//!
//! The concrete source is picked at startup from configuration; [`Source`]
//! dispatches to whichever adapter was built.

mod exchange_rate_api;

use std::str::FromStr;
use std::time::Duration;

use converter_types::{CurrencyCode, FetchError, RateSource, RateTable};
use exchange_rates::StaticRateSource;

pub use exchange_rate_api::{DEFAULT_API_URL, ExchangeRateApi};

/// Which kind of rate source to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Remote,
    Offline,
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remote" => Ok(SourceKind::Remote),
            "offline" | "static" => Ok(SourceKind::Offline),
            other => Err(format!(
                "Unknown rate source: {}. Supported: remote, offline",
                other
            )),
        }
    }
}

/// Settings needed to build a [`Source`].
#[derive(Debug, Clone)]
pub enum SourceConfig {
    Remote {
        api_url: String,
        api_key: String,
        timeout: Option<Duration>,
    },
    Offline,
}

/// Rate source chosen at runtime.
pub enum Source {
    Remote(ExchangeRateApi),
    Offline(StaticRateSource),
}

/// Builds the configured rate source.
///
/// # Example
/// ```
/// use converter_hex::outbound::{SourceConfig, build_source};
///
/// let source = build_source(SourceConfig::Offline);
/// ```
pub fn build_source(config: SourceConfig) -> Source {
    match config {
        SourceConfig::Remote {
            api_url,
            api_key,
            timeout,
        } => {
            let api = ExchangeRateApi::new(api_url, api_key);
            Source::Remote(match timeout {
                Some(timeout) => api.with_timeout(timeout),
                None => api,
            })
        }
        SourceConfig::Offline => Source::Offline(StaticRateSource::new()),
    }
}

#[async_trait::async_trait]
impl RateSource for Source {
    fn name(&self) -> &'static str {
        match self {
            Source::Remote(inner) => inner.name(),
            Source::Offline(inner) => inner.name(),
        }
    }

    async fn fetch_rates(&self, base: &CurrencyCode) -> Result<RateTable, FetchError> {
        match self {
            Source::Remote(inner) => inner.fetch_rates(base).await,
            Source::Offline(inner) => inner.fetch_rates(base).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_kind_parse() {
        assert_eq!("remote".parse::<SourceKind>(), Ok(SourceKind::Remote));
        assert_eq!("Offline".parse::<SourceKind>(), Ok(SourceKind::Offline));
        assert_eq!("static".parse::<SourceKind>(), Ok(SourceKind::Offline));
        assert!("ftp".parse::<SourceKind>().is_err());
    }

    #[tokio::test]
    async fn test_offline_source_dispatch() {
        let source = build_source(SourceConfig::Offline);
        assert_eq!(source.name(), "static");

        let table = source
            .fetch_rates(&CurrencyCode::new("USD").unwrap())
            .await
            .unwrap();
        assert_eq!(table.lookup("INR"), Some(83.0));
    }

    #[test]
    fn test_remote_source_build() {
        let source = build_source(SourceConfig::Remote {
            api_url: DEFAULT_API_URL.into(),
            api_key: "k".into(),
            timeout: Some(Duration::from_secs(3)),
        });
        assert_eq!(source.name(), "exchangerate-api");
    }
}
