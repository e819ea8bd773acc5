//! Data Transfer Objects (DTOs) for requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::CurrencyCode;

// ─────────────────────────────────────────────────────────────────────────────
// Conversion result
// ─────────────────────────────────────────────────────────────────────────────

/// A converted amount as shown to the user.
///
/// `Unavailable` is kept distinct from zero so "no conversion possible" is
/// never mistaken for "converts to nothing". Serialized as a 2-decimal string
/// or the literal `"unavailable"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Conversion {
    Available(f64),
    Unavailable,
}

impl Conversion {
    pub const UNAVAILABLE: &'static str = "unavailable";
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conversion::Available(v) => write!(f, "{:.2}", v),
            Conversion::Unavailable => f.write_str(Self::UNAVAILABLE),
        }
    }
}

impl From<Conversion> for String {
    fn from(c: Conversion) -> Self {
        c.to_string()
    }
}

impl TryFrom<String> for Conversion {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == Self::UNAVAILABLE {
            return Ok(Conversion::Unavailable);
        }
        value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Conversion::Available)
            .ok_or_else(|| format!("invalid conversion value: {:?}", value))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Display state
// ─────────────────────────────────────────────────────────────────────────────

/// Everything a UI needs to render the converter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayState {
    /// Normalized amount text as entered
    pub amount: String,
    pub from_currency: CurrencyCode,
    pub to_currency: CurrencyCode,
    pub converted_amount: Conversion,
    pub loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Base currency of the active table, absent until the first load
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_currency: Option<CurrencyCode>,
    /// Codes available for selection (empty until the first load)
    pub currencies: Vec<CurrencyCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl DisplayState {
    /// Inputs are usable only once a table is loaded and no fetch is running.
    pub fn inputs_enabled(&self) -> bool {
        !self.loading && !self.currencies.is_empty()
    }
}

/// One entry of the popular conversions grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularConversion {
    pub currency: CurrencyCode,
    pub symbol: String,
    pub converted_amount: Conversion,
}

/// Listing of the active rate table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatesResponse {
    pub base: CurrencyCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub rates: BTreeMap<CurrencyCode, f64>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Requests
// ─────────────────────────────────────────────────────────────────────────────

/// Request to replace the amount text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetAmountRequest {
    pub amount: String,
}

/// Request to select a currency on either side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetCurrencyRequest {
    pub currency: String,
}
