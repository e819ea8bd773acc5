//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use converter_hex::ConverterSettings;
use converter_hex::outbound::{DEFAULT_API_URL, SourceConfig, SourceKind};
use converter_types::CurrencyCode;

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub source: SourceConfig,
    pub settings: ConverterSettings,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = var("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()?;

        let kind: SourceKind = var("RATE_SOURCE")
            .unwrap_or_else(|| "remote".to_string())
            .parse()
            .map_err(anyhow::Error::msg)?;

        let source = match kind {
            SourceKind::Remote => {
                let api_key = var("EXCHANGE_RATE_API_KEY").ok_or_else(|| {
                    anyhow::anyhow!(
                        "EXCHANGE_RATE_API_KEY environment variable is required (or set RATE_SOURCE=offline)"
                    )
                })?;
                let timeout_secs: u64 = var("FETCH_TIMEOUT_SECS")
                    .unwrap_or_else(|| "10".to_string())
                    .parse()?;
                SourceConfig::Remote {
                    api_url: var("EXCHANGE_RATE_API_URL")
                        .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
                    api_key,
                    timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
                }
            }
            SourceKind::Offline => SourceConfig::Offline,
        };

        let base: CurrencyCode = var("BASE_CURRENCY")
            .unwrap_or_else(|| "USD".to_string())
            .parse()?;
        let secondary: CurrencyCode = var("SECONDARY_CURRENCY")
            .unwrap_or_else(|| "INR".to_string())
            .parse()?;

        Ok(Self {
            port,
            source,
            settings: ConverterSettings::new(base, secondary),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_remote_requires_api_key() {
        let result = Config::from_lookup(lookup(&[]));
        assert!(result.is_err());
    }

    #[test]
    fn test_remote_defaults() {
        let config = Config::from_lookup(lookup(&[("EXCHANGE_RATE_API_KEY", "abc")])).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.settings.base_currency.as_str(), "USD");
        assert_eq!(config.settings.secondary_currency.as_str(), "INR");
        match config.source {
            SourceConfig::Remote {
                api_url,
                api_key,
                timeout,
            } => {
                assert_eq!(api_url, DEFAULT_API_URL);
                assert_eq!(api_key, "abc");
                assert_eq!(timeout, Some(Duration::from_secs(10)));
            }
            SourceConfig::Offline => panic!("expected remote source"),
        }
    }

    #[test]
    fn test_offline_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("RATE_SOURCE", "offline"),
            ("PORT", "8080"),
            ("BASE_CURRENCY", "eur"),
            ("SECONDARY_CURRENCY", "gbp"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert!(matches!(config.source, SourceConfig::Offline));
        assert_eq!(config.settings.base_currency.as_str(), "EUR");
        assert_eq!(config.settings.secondary_currency.as_str(), "GBP");
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Config::from_lookup(lookup(&[("RATE_SOURCE", "carrier-pigeon")])).is_err());
        assert!(
            Config::from_lookup(lookup(&[("RATE_SOURCE", "offline"), ("BASE_CURRENCY", "X")]))
                .is_err()
        );
    }
}
