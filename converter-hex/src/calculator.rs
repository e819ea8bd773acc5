//! Base-currency triangulation.

use converter_types::{ConvertError, RateTable};

/// Converts `amount` from one currency to another through the table's base.
///
/// `amount / r_from * r_to`, with the base rate fixed at 1.0. The same
/// formula covers base-to-X, X-to-base and cross conversions. The result keeps
/// full precision; round only when displaying.
pub fn convert(amount: f64, from: &str, to: &str, table: &RateTable) -> Result<f64, ConvertError> {
    let r_from = rate_of(table, from)?;
    let r_to = rate_of(table, to)?;
    Ok(amount / r_from * r_to)
}

/// Units of `to` per one unit of `from`.
pub fn cross_rate(from: &str, to: &str, table: &RateTable) -> Result<f64, ConvertError> {
    convert(1.0, from, to, table)
}

fn rate_of(table: &RateTable, code: &str) -> Result<f64, ConvertError> {
    table
        .lookup(code)
        .ok_or_else(|| ConvertError::RateNotFound(code.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use converter_types::CurrencyCode;

    const EPS: f64 = 1e-9;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::new(s).unwrap()
    }

    fn table() -> RateTable {
        RateTable::new(
            code("USD"),
            [
                (code("USD"), 1.0),
                (code("INR"), 83.0),
                (code("EUR"), 0.92),
                (code("JPY"), 149.5),
            ],
        )
        .unwrap()
    }

    /// Variant that special-cases the base on either side.
    fn convert_branching(amount: f64, from: &str, to: &str, table: &RateTable) -> f64 {
        let base = table.base().as_str();
        if from == base {
            amount * table.lookup(to).unwrap()
        } else if to == base {
            amount / table.lookup(from).unwrap()
        } else {
            let in_base = amount / table.lookup(from).unwrap();
            in_base * table.lookup(to).unwrap()
        }
    }

    #[test]
    fn test_usd_to_inr() {
        let result = convert(10.0, "USD", "INR", &table()).unwrap();
        assert_eq!(format!("{:.2}", result), "830.00");
    }

    #[test]
    fn test_inr_to_usd() {
        let result = convert(830.0, "INR", "USD", &table()).unwrap();
        assert_eq!(format!("{:.2}", result), "10.00");
    }

    #[test]
    fn test_cross_conversion_without_base() {
        let result = convert(100.0, "INR", "EUR", &table()).unwrap();
        assert!((result - 100.0 / 83.0 * 0.92).abs() < EPS);
        assert!((result - 1.108).abs() < 1e-3);
        assert_eq!(format!("{:.2}", result), "1.11");
    }

    #[test]
    fn test_same_currency_is_identity() {
        for c in ["USD", "INR", "EUR", "JPY"] {
            let result = convert(123.45, c, c, &table()).unwrap();
            assert!((result - 123.45).abs() < EPS, "{c}");
        }
    }

    #[test]
    fn test_zero_amount() {
        for (from, to) in [("USD", "INR"), ("INR", "EUR"), ("JPY", "USD")] {
            assert_eq!(convert(0.0, from, to, &table()).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_missing_currency() {
        let result = convert(10.0, "USD", "ZZZ", &table());
        assert_eq!(result, Err(ConvertError::RateNotFound("ZZZ".into())));

        let result = convert(10.0, "ZZZ", "USD", &table());
        assert!(matches!(result, Err(ConvertError::RateNotFound(_))));
    }

    #[test]
    fn test_triangulation_consistency() {
        let t = table();
        let codes = ["USD", "INR", "EUR", "JPY"];
        for x in codes {
            for y in codes {
                for z in codes {
                    let via_y = convert(convert(250.0, x, y, &t).unwrap(), y, z, &t).unwrap();
                    let direct = convert(250.0, x, z, &t).unwrap();
                    assert!(
                        (via_y - direct).abs() < 1e-9 * direct.abs().max(1.0),
                        "{x}->{y}->{z}: {via_y} vs {direct}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_matches_branching_variant() {
        let t = table();
        let codes = ["USD", "INR", "EUR", "JPY"];
        for from in codes {
            for to in codes {
                let uniform = convert(42.0, from, to, &t).unwrap();
                let branching = convert_branching(42.0, from, to, &t);
                assert!(
                    (uniform - branching).abs() < EPS * uniform.abs().max(1.0),
                    "{from}->{to}"
                );
            }
        }
    }

    #[test]
    fn test_cross_rate() {
        let rate = cross_rate("EUR", "INR", &table()).unwrap();
        assert!((rate - 83.0 / 0.92).abs() < EPS);
    }
}
