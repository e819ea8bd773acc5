//! Amount text normalization.

use converter_types::ConvertError;

/// Strips leading zeros; empty or all-zero input collapses to `"0"`.
///
/// Non-digit characters are left alone - rejecting them is an input-pattern
/// concern of the presentation layer.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim_start_matches('0');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Parses normalized amount text into a non-negative finite number.
pub fn parse_amount(text: &str) -> Result<f64, ConvertError> {
    let invalid = || ConvertError::InvalidAmount(text.to_string());
    let value: f64 = text.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    // "-0" parses to -0.0, which would render as "-0.00".
    Ok(value + 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_leading_zeros() {
        assert_eq!(normalize("007"), "7");
        assert_eq!(normalize("100"), "100");
        assert_eq!(normalize("0100"), "100");
    }

    #[test]
    fn test_normalize_collapses_to_zero() {
        assert_eq!(normalize("000"), "0");
        assert_eq!(normalize("0"), "0");
        assert_eq!(normalize(""), "0");
    }

    #[test]
    fn test_normalize_keeps_other_characters() {
        assert_eq!(normalize("0.5"), ".5");
        assert_eq!(normalize("00abc"), "abc");
        assert_eq!(normalize("-05"), "-05");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("10"), Ok(10.0));
        assert_eq!(parse_amount(".5"), Ok(0.5));
        assert_eq!(parse_amount("0"), Ok(0.0));
    }

    #[test]
    fn test_parse_amount_negative_zero() {
        let value = parse_amount("-0").unwrap();
        assert!(value.is_sign_positive());
        assert_eq!(format!("{:.2}", value), "0.00");
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        for bad in ["abc", "-5", "NaN", "inf", "1e400", ""] {
            assert!(
                matches!(parse_amount(bad), Err(ConvertError::InvalidAmount(_))),
                "{bad:?} should be invalid"
            );
        }
    }
}
