//! Error types for the currency converter.

use crate::domain::CurrencyCode;

/// Domain-level errors (invariant violations while building values).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid currency code: {0:?}")]
    InvalidCurrencyCode(String),

    #[error("Rate for {code} must be positive and finite, got {rate}")]
    InvalidRate { code: CurrencyCode, rate: f64 },

    #[error("Base currency {code} must have rate 1.0, got {rate}")]
    BaseRateNotOne { code: CurrencyCode, rate: f64 },
}

/// Errors raised while loading a rate table from a source.
///
/// Every variant is recoverable by retrying the fetch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Rate provider error: {0}")]
    Api(String),

    #[error("Malformed rate payload: {0}")]
    MalformedPayload(String),
}

/// Errors local to a single conversion attempt.
///
/// These never touch the fetch lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error("Rate not found for {0}")]
    RateNotFound(String),

    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<ConvertError> for AppError {
    fn from(err: ConvertError) -> Self {
        match err {
            ConvertError::RateNotFound(code) => {
                AppError::NotFound(format!("Rate not found for {}", code))
            }
            ConvertError::InvalidAmount(raw) => {
                AppError::BadRequest(format!("Invalid amount: {:?}", raw))
            }
        }
    }
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        AppError::Unavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_maps_to_unavailable() {
        let err: AppError = FetchError::Api("invalid-key".into()).into();
        assert!(matches!(err, AppError::Unavailable(msg) if msg.contains("invalid-key")));
    }

    #[test]
    fn test_convert_error_mapping() {
        let err: AppError = ConvertError::RateNotFound("ZZZ".into()).into();
        assert!(matches!(err, AppError::NotFound(_)));

        let err: AppError = ConvertError::InvalidAmount("abc".into()).into();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
