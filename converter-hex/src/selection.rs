//! User selection and the derived converted amount.

use converter_types::{Conversion, CurrencyCode, RateTable};

use crate::calculator;
use crate::normalize::{normalize, parse_amount};

/// Amount text plus the two selected currencies.
///
/// The converted amount is never stored; [`SelectionState::converted`]
/// recomputes it from the current fields and table on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    amount: String,
    from: CurrencyCode,
    to: CurrencyCode,
}

impl SelectionState {
    pub const INITIAL_AMOUNT: &'static str = "1";

    pub fn new(from: CurrencyCode, to: CurrencyCode) -> Self {
        Self {
            amount: Self::INITIAL_AMOUNT.to_string(),
            from,
            to,
        }
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn from_currency(&self) -> &CurrencyCode {
        &self.from
    }

    pub fn to_currency(&self) -> &CurrencyCode {
        &self.to
    }

    /// Stores the normalized form of `raw`.
    pub fn set_amount(&mut self, raw: &str) {
        self.amount = normalize(raw);
    }

    pub fn set_from_currency(&mut self, code: CurrencyCode) {
        self.from = code;
    }

    pub fn set_to_currency(&mut self, code: CurrencyCode) {
        self.to = code;
    }

    /// Resets both currencies after a table (re)load. The amount is kept.
    pub fn reset_currencies(&mut self, from: CurrencyCode, to: CurrencyCode) {
        self.from = from;
        self.to = to;
    }

    /// Converted amount against `table`.
    ///
    /// Amount text that does not parse shows as zero; a currency missing from
    /// the table shows as unavailable.
    pub fn converted(&self, table: &RateTable) -> Conversion {
        convert_text(&self.amount, &self.from, &self.to, table)
    }
}

/// Converts amount text for display, applying the zero/unavailable fallbacks.
pub(crate) fn convert_text(
    amount: &str,
    from: &CurrencyCode,
    to: &CurrencyCode,
    table: &RateTable,
) -> Conversion {
    let amount = parse_amount(amount).unwrap_or_else(|e| {
        tracing::trace!(error = %e, "Amount does not parse, showing zero");
        0.0
    });

    match calculator::convert(amount, from.as_str(), to.as_str(), table) {
        Ok(value) => Conversion::Available(value),
        Err(e) => {
            tracing::debug!(error = %e, "Conversion unavailable");
            Conversion::Unavailable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::new(s).unwrap()
    }

    fn table() -> RateTable {
        RateTable::new(code("USD"), [(code("INR"), 83.0), (code("EUR"), 0.92)]).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let state = SelectionState::new(code("USD"), code("INR"));
        assert_eq!(state.amount(), "1");
        assert_eq!(state.converted(&table()), Conversion::Available(83.0));
    }

    #[test]
    fn test_amount_is_normalized() {
        let mut state = SelectionState::new(code("USD"), code("INR"));
        state.set_amount("0010");
        assert_eq!(state.amount(), "10");
        assert_eq!(state.converted(&table()).to_string(), "830.00");
    }

    #[test]
    fn test_currency_change_keeps_amount() {
        let mut state = SelectionState::new(code("USD"), code("INR"));
        state.set_amount("100");
        state.set_from_currency(code("INR"));
        state.set_to_currency(code("EUR"));
        assert_eq!(state.amount(), "100");
        assert_eq!(state.converted(&table()).to_string(), "1.11");
    }

    #[test]
    fn test_amount_change_keeps_currencies() {
        let mut state = SelectionState::new(code("EUR"), code("INR"));
        state.set_amount("5");
        assert_eq!(state.from_currency(), &code("EUR"));
        assert_eq!(state.to_currency(), &code("INR"));
    }

    #[test]
    fn test_unparsable_amount_shows_zero() {
        let mut state = SelectionState::new(code("USD"), code("INR"));
        state.set_amount("12abc");
        assert_eq!(state.converted(&table()), Conversion::Available(0.0));
        assert_eq!(state.converted(&table()).to_string(), "0.00");
    }

    #[test]
    fn test_missing_currency_is_unavailable() {
        let mut state = SelectionState::new(code("USD"), code("INR"));
        state.set_to_currency(code("ZZZ"));
        assert_eq!(state.converted(&table()), Conversion::Unavailable);

        state.set_amount("0");
        assert_eq!(state.converted(&table()), Conversion::Unavailable);
    }

    #[test]
    fn test_reset_currencies_keeps_amount() {
        let mut state = SelectionState::new(code("EUR"), code("EUR"));
        state.set_amount("42");
        state.reset_currencies(code("USD"), code("INR"));
        assert_eq!(state.amount(), "42");
        assert_eq!(state.from_currency(), &code("USD"));
        assert_eq!(state.to_currency(), &code("INR"));
    }
}
