//! Base-relative rate snapshot.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use super::CurrencyCode;
use crate::error::DomainError;

const BASE_RATE_TOLERANCE: f64 = 1e-9;

/// Snapshot of rates, all expressed as units of a currency per one unit of `base`.
///
/// Invariants (checked by [`RateTable::new`]):
/// - every rate is finite and strictly positive
/// - the base currency is always present with rate exactly 1.0
///
/// A table is never mutated after construction; refreshing means building a
/// new one.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    base: CurrencyCode,
    rates: BTreeMap<CurrencyCode, f64>,
    updated_at: Option<DateTime<Utc>>,
}

impl RateTable {
    /// Builds a table, inserting the base at 1.0 when the source omitted it.
    pub fn new(
        base: CurrencyCode,
        rates: impl IntoIterator<Item = (CurrencyCode, f64)>,
    ) -> Result<Self, DomainError> {
        let mut map = BTreeMap::new();
        for (code, rate) in rates {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(DomainError::InvalidRate { code, rate });
            }
            if code == base && (rate - 1.0).abs() > BASE_RATE_TOLERANCE {
                return Err(DomainError::BaseRateNotOne { code, rate });
            }
            map.insert(code, rate);
        }
        map.insert(base.clone(), 1.0);

        Ok(Self {
            base,
            rates: map,
            updated_at: None,
        })
    }

    /// Attaches the provider's "last updated" timestamp.
    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    pub fn base(&self) -> &CurrencyCode {
        &self.base
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Rate of `code` relative to the base, if present.
    pub fn lookup(&self, code: &str) -> Option<f64> {
        let code = CurrencyCode::new(code).ok()?;
        self.rates.get(&code).copied()
    }

    pub fn has_currency(&self, code: &str) -> bool {
        self.lookup(code).is_some()
    }

    /// All codes in the table (base included), sorted.
    pub fn codes(&self) -> Vec<CurrencyCode> {
        self.rates.keys().cloned().collect()
    }

    pub fn rates(&self) -> &BTreeMap<CurrencyCode, f64> {
        &self.rates
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::new(s).unwrap()
    }

    #[test]
    fn test_base_is_implicit() {
        let table = RateTable::new(code("USD"), [(code("INR"), 83.0)]).unwrap();
        assert_eq!(table.lookup("USD"), Some(1.0));
        assert_eq!(table.lookup("INR"), Some(83.0));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_lookup_missing() {
        let table = RateTable::new(code("USD"), [(code("INR"), 83.0)]).unwrap();
        assert_eq!(table.lookup("ZZZ"), None);
        assert!(!table.has_currency("ZZZ"));
        assert!(table.has_currency("inr"));
    }

    #[test]
    fn test_codes_are_sorted() {
        let table = RateTable::new(
            code("USD"),
            [(code("JPY"), 149.5), (code("EUR"), 0.92), (code("INR"), 83.0)],
        )
        .unwrap();
        let codes: Vec<String> = table.codes().into_iter().map(String::from).collect();
        assert_eq!(codes, vec!["EUR", "INR", "JPY", "USD"]);
    }

    #[test]
    fn test_rejects_non_positive_rates() {
        let result = RateTable::new(code("USD"), [(code("INR"), 0.0)]);
        assert!(matches!(result, Err(DomainError::InvalidRate { .. })));

        let result = RateTable::new(code("USD"), [(code("INR"), -1.0)]);
        assert!(matches!(result, Err(DomainError::InvalidRate { .. })));

        let result = RateTable::new(code("USD"), [(code("INR"), f64::NAN)]);
        assert!(matches!(result, Err(DomainError::InvalidRate { .. })));
    }

    #[test]
    fn test_rejects_base_not_one() {
        let result = RateTable::new(code("USD"), [(code("USD"), 1.2)]);
        assert!(matches!(result, Err(DomainError::BaseRateNotOne { .. })));

        assert!(RateTable::new(code("USD"), [(code("USD"), 1.0)]).is_ok());
    }
}
