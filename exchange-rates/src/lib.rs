//! Static Exchange Rates with Macro-Based Currency Generation
//!
//! This library provides a hard-coded rate table usable without any network
//! access. Currencies are defined declaratively using a macro that generates
//! the seed list and symbol lookup.
//!
//! Rates need not be current, only internally consistent: every rate is
//! positive and the seed base (USD) is exactly 1.0.
//!
//! # Adding a New Currency
//! Simply add a line to the `define_currencies!` macro invocation:
//! ```ignore
//! define_currencies! {
//!     // ... existing currencies ...
//!     SEK => ("SEK", "kr", 10.45),
//! }
//! ```
//!
//! # Example
//! ```
//! use converter_types::CurrencyCode;
//! use exchange_rates::StaticRateSource;
//!
//! let table = StaticRateSource::new()
//!     .table(&CurrencyCode::new("USD").unwrap())
//!     .unwrap();
//! assert_eq!(table.lookup("USD"), Some(1.0));
//! assert_eq!(exchange_rates::symbol("INR"), Some("₹"));
//! ```

use converter_types::{CurrencyCode, FetchError, RateSource, RateTable};

/// Base currency every seed rate is expressed against.
pub const SEED_BASE: &str = codes::USD;

/// Currencies shown in the popular conversions grid, in display order.
pub const POPULAR_CURRENCIES: &[&str] = &[
    codes::USD,
    codes::GBP,
    codes::INR,
    codes::AUD,
    codes::CAD,
    codes::JPY,
    codes::CNY,
    codes::CHF,
];

/// One hard-coded currency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedCurrency {
    pub code: &'static str,
    pub symbol: &'static str,
    /// Units of this currency per one USD.
    pub per_usd: f64,
}

// ─────────────────────────────────────────────────────────────────────────────
// THE MACRO: Defines the seed table and symbol lookup
// ─────────────────────────────────────────────────────────────────────────────

/// Macro to define seeded currencies with their code constant, symbol and USD rate.
///
/// # Syntax
/// ```ignore
/// define_currencies! {
///     CurrencyName => ("CODE", "SYMBOL", units_per_usd),
/// }
/// ```
#[macro_export]
macro_rules! define_currencies {
    (
        $(
            $name:ident => ($code:literal, $symbol:literal, $per_usd:expr)
        ),* $(,)?
    ) => {
        /// Named codes of the seeded currencies.
        pub mod codes {
            $(pub const $name: &str = $code;)*
        }

        /// Every seeded currency, in declaration order.
        pub const SEED: &[SeedCurrency] = &[
            $(SeedCurrency { code: $code, symbol: $symbol, per_usd: $per_usd }),*
        ];

        /// Display symbol for a seeded currency.
        pub fn symbol(code: &str) -> Option<&'static str> {
            match code.to_ascii_uppercase().as_str() {
                $($code => Some($symbol),)*
                _ => None,
            }
        }

        fn per_usd(code: &str) -> Option<f64> {
            match code {
                $($code => Some($per_usd),)*
                _ => None,
            }
        }
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// CURRENCY DEFINITIONS - Add new currencies here!
// ─────────────────────────────────────────────────────────────────────────────

define_currencies! {
    USD => ("USD", "$", 1.0),
    EUR => ("EUR", "€", 0.92),
    GBP => ("GBP", "£", 0.79),
    INR => ("INR", "₹", 83.0),
    AUD => ("AUD", "A$", 1.52),
    CAD => ("CAD", "C$", 1.36),
    JPY => ("JPY", "¥", 149.5),
    CNY => ("CNY", "¥", 7.24),
    CHF => ("CHF", "CHF", 0.88),
}

// ─────────────────────────────────────────────────────────────────────────────
// Offline rate source
// ─────────────────────────────────────────────────────────────────────────────

/// Rate source backed by the seed table. Never touches the network.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticRateSource;

impl StaticRateSource {
    pub fn new() -> Self {
        Self
    }

    /// Builds the seed table against `base`, rebasing from USD if needed.
    pub fn table(&self, base: &CurrencyCode) -> Result<RateTable, FetchError> {
        let base_per_usd = per_usd(base.as_str())
            .ok_or_else(|| FetchError::Api(format!("unsupported-code: {}", base)))?;

        let mut rates = Vec::with_capacity(SEED.len());
        for seed in SEED {
            let code = CurrencyCode::new(seed.code)
                .map_err(|e| FetchError::MalformedPayload(e.to_string()))?;
            let rate = if code == *base {
                1.0
            } else {
                seed.per_usd / base_per_usd
            };
            rates.push((code, rate));
        }

        RateTable::new(base.clone(), rates).map_err(|e| FetchError::MalformedPayload(e.to_string()))
    }
}

#[async_trait::async_trait]
impl RateSource for StaticRateSource {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn fetch_rates(&self, base: &CurrencyCode) -> Result<RateTable, FetchError> {
        let table = self.table(base)?;
        tracing::debug!(base = %base, currencies = table.len(), "Loaded static rate table");
        Ok(table)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
